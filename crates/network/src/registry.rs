use extract::Entity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// What happens when a text is classified more than once in a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The first classification is kept
    #[default]
    FirstWins,
    /// First wins, but a certain classification replaces an uncertain one
    PreferCertain,
}

/// One entity per unique text, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    entity_to_idx: HashMap<String, usize>,
    policy: MergePolicy,
}

impl EntityRegistry {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            entities: Vec::new(),
            entity_to_idx: HashMap::new(),
            policy,
        }
    }

    /// Register a classification and return the entity now on record for its text
    pub fn register(&mut self, entity: Entity) -> &Entity {
        let Some(&idx) = self.entity_to_idx.get(&entity.text) else {
            let idx = self.entities.len();
            self.entity_to_idx.insert(entity.text.clone(), idx);
            self.entities.push(entity);
            return &self.entities[idx];
        };

        let existing = &mut self.entities[idx];
        let replace = match self.policy {
            MergePolicy::FirstWins => false,
            MergePolicy::PreferCertain => !existing.certain && entity.certain,
        };

        if replace {
            debug!(text = %entity.text, label = %entity.label, "Upgrading entity to certain");
            *existing = entity;
        } else if *existing != entity {
            debug!(
                text = %entity.text,
                kept = %existing.label,
                ignored = %entity.label,
                "Conflicting classification ignored"
            );
        }

        &self.entities[idx]
    }

    pub fn get(&self, text: &str) -> Option<&Entity> {
        self.entity_to_idx.get(text).map(|&idx| &self.entities[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
