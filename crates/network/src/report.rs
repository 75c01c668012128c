use extract::EntityLabel;
use std::collections::BTreeMap;

use crate::pipeline::Mention;
use crate::registry::EntityRegistry;

/// Console listing of mentions: verified first, then uncertain, grouped by category
pub fn render_report(mentions: &[Mention]) -> String {
    let (verified, uncertain): (Vec<&Mention>, Vec<&Mention>) =
        mentions.iter().partition(|m| m.entity.certain);

    let mut out = String::new();

    out.push_str("=== Verified Entities ===\n");
    push_mentions(&mut out, &verified);

    if !uncertain.is_empty() {
        out.push_str("\n=== Uncertain Entities (May Not Be Locations) ===\n");
        push_mentions(&mut out, &uncertain);
    }

    out
}

fn push_mentions(out: &mut String, mentions: &[&Mention]) {
    let mut groups: BTreeMap<EntityLabel, Vec<&Mention>> = BTreeMap::new();
    for &mention in mentions {
        groups.entry(mention.entity.label).or_default().push(mention);
    }

    for (label, group) in groups {
        out.push_str(&format!("\n{}:\n", label));
        for mention in group {
            out.push_str(&format!("  - {}\n", mention.entity.text));
            out.push_str(&format!("    Context: {}\n", mention.context));
        }
    }
}

/// Unique entities by certainty and category, as printed after a graph export
pub fn render_summary(entities: &EntityRegistry) -> String {
    let mut out = String::new();

    for (heading, certain) in [("Certain Entities:", true), ("Uncertain Entities:", false)] {
        out.push_str(&format!("\n{}\n", heading));

        let mut groups: BTreeMap<EntityLabel, Vec<&str>> = BTreeMap::new();
        for entity in entities.iter().filter(|e| e.certain == certain) {
            groups.entry(entity.label).or_default().push(&entity.text);
        }

        for (label, texts) in groups {
            out.push_str(&format!("\n{}:\n", label));
            for text in texts {
                out.push_str(&format!("  - {}\n", text));
            }
        }
    }

    out
}
