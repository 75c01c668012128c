use extract::{Entity, EntityLabel};
use serde::Serialize;

/// Co-occurrence of two entities in one sentence. Field names are the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    #[serde(rename = "Entity 1")]
    pub source: String,
    #[serde(rename = "Entity 2")]
    pub target: String,
    #[serde(rename = "Type 1")]
    pub source_label: EntityLabel,
    #[serde(rename = "Type 2")]
    pub target_label: EntityLabel,
    #[serde(rename = "Context")]
    pub context: String,
}

/// One connection per unordered pair (i, j), i < j, in detection order
pub fn build_connections(entities: &[Entity], context: &str) -> Vec<Connection> {
    let mut connections = Vec::new();

    for (i, first) in entities.iter().enumerate() {
        for second in &entities[i + 1..] {
            connections.push(Connection {
                source: first.text.clone(),
                target: second.text.clone(),
                source_label: first.label,
                target_label: second.label,
                context: context.to_string(),
            });
        }
    }

    connections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        (0..n)
            .map(|i| Entity::new(format!("E{}", i), EntityLabel::Org, true))
            .collect()
    }

    #[test]
    fn test_zero_or_one_entity_has_no_connections() {
        assert!(build_connections(&entities(0), "ctx").is_empty());
        assert!(build_connections(&entities(1), "ctx").is_empty());
    }

    #[test]
    fn test_pair_count() {
        for k in 2..8 {
            let connections = build_connections(&entities(k), "ctx");
            assert_eq!(connections.len(), k * (k - 1) / 2);
            assert!(connections.iter().all(|c| c.source != c.target));
        }
    }

    #[test]
    fn test_example_sentence() {
        let sentence = "Rotting Christ played in Athens in 1993";
        let found = vec![
            Entity::new("Rotting Christ", EntityLabel::Band, true),
            Entity::new("Athens", EntityLabel::Gpe, true),
            Entity::new("1993", EntityLabel::Date, true),
        ];

        let pairs: Vec<_> = build_connections(&found, sentence)
            .into_iter()
            .map(|c| (c.source, c.target, c.source_label, c.target_label))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Rotting Christ".to_string(), "Athens".to_string(), EntityLabel::Band, EntityLabel::Gpe),
                ("Rotting Christ".to_string(), "1993".to_string(), EntityLabel::Band, EntityLabel::Date),
                ("Athens".to_string(), "1993".to_string(), EntityLabel::Gpe, EntityLabel::Date),
            ]
        );
    }
}
