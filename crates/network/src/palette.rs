use extract::{Entity, EntityLabel};
use serde::{Deserialize, Serialize};

/// Node colors per category, plus the override for uncertain entities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub band: String,
    pub location: String, // LOC and GPE
    pub organization: String,
    pub person: String,
    pub date: String,
    pub uncertain: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            band: "#ff4444".to_string(),
            location: "#44ff44".to_string(),
            organization: "#4444ff".to_string(),
            person: "#ffff44".to_string(),
            date: "#ff44ff".to_string(),
            uncertain: "#ff9900".to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, label: EntityLabel) -> &str {
        match label {
            EntityLabel::Band => &self.band,
            EntityLabel::Loc | EntityLabel::Gpe => &self.location,
            EntityLabel::Org => &self.organization,
            EntityLabel::Person => &self.person,
            EntityLabel::Date => &self.date,
        }
    }

    pub fn node_color(&self, entity: &Entity) -> &str {
        if entity.certain {
            self.color_for(entity.label)
        } else {
            &self.uncertain
        }
    }
}
