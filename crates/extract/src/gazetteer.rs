//! Offline recognizer: dictionary lookup plus date patterns.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::recognizer::EntityRecognizer;
use crate::schema::{EntityLabel, Span};

/// Dictionary entry for entity matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub term: String,
    pub label: EntityLabel,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl GazetteerEntry {
    pub fn new(term: &str, label: EntityLabel, aliases: &[&str]) -> Self {
        Self {
            term: term.to_string(),
            label,
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const GREEK_MONTHS: &str = "Ιανουαρίου|Φεβρουαρίου|Μαρτίου|Απριλίου|Μαΐου|Ιουνίου|Ιουλίου|Αυγούστου|Σεπτεμβρίου|Οκτωβρίου|Νοεμβρίου|Δεκεμβρίου";

pub fn default_entries() -> Vec<GazetteerEntry> {
    vec![
        GazetteerEntry::new("Αθήνα", EntityLabel::Gpe, &["Αθήνας", "Athens"]),
        GazetteerEntry::new("Θεσσαλονίκη", EntityLabel::Gpe, &["Θεσσαλονίκης", "Thessaloniki"]),
        GazetteerEntry::new("Πάτρα", EntityLabel::Gpe, &["Πάτρας", "Patras"]),
        GazetteerEntry::new("Λάρισα", EntityLabel::Gpe, &["Λάρισας", "Larissa"]),
        GazetteerEntry::new("Ηράκλειο", EntityLabel::Gpe, &["Ηρακλείου", "Heraklion"]),
        GazetteerEntry::new("Ελλάδα", EntityLabel::Gpe, &["Ελλάδας", "Greece"]),
        GazetteerEntry::new("Κρήτη", EntityLabel::Loc, &["Κρήτης", "Crete"]),
        GazetteerEntry::new("Όλυμπος", EntityLabel::Loc, &["Ολύμπου", "Olympus"]),
        GazetteerEntry::new("Εξάρχεια", EntityLabel::Loc, &["Εξαρχείων", "Exarchia"]),
        GazetteerEntry::new("Century Media", EntityLabel::Org, &[]),
        GazetteerEntry::new("Osmose Productions", EntityLabel::Org, &[]),
        GazetteerEntry::new("Season of Mist", EntityLabel::Org, &[]),
        GazetteerEntry::new("Σάκης Τόλης", EntityLabel::Person, &["Sakis Tolis"]),
    ]
}

/// Rule-based recognizer using a term dictionary and regex date patterns
pub struct GazetteerRecognizer {
    /// Pattern rules (regex -> label), dictionary terms first
    patterns: Vec<(Regex, EntityLabel)>,
}

impl GazetteerRecognizer {
    pub fn new(entries: &[GazetteerEntry]) -> Result<Self> {
        let mut patterns = Vec::new();

        for entry in entries {
            let alternation = std::iter::once(&entry.term)
                .chain(entry.aliases.iter())
                .map(|term| term.trim())
                .filter(|term| !term.is_empty())
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");

            if alternation.is_empty() {
                continue;
            }

            let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
                .context(format!("Invalid gazetteer term: {}", entry.term))?;
            patterns.push((regex, entry.label));
        }

        for pattern in Self::date_patterns() {
            let regex = Regex::new(&pattern).context("Invalid date pattern")?;
            patterns.push((regex, EntityLabel::Date));
        }

        Ok(Self { patterns })
    }

    fn date_patterns() -> Vec<String> {
        vec![
            format!(r"(?i)\b(?:\d{{1,2}}\s+)?(?:{})(?:\s+\d{{4}})?\b", GREEK_MONTHS),
            r"\b\d{1,2}[-/.]\d{1,2}[-/.]\d{4}\b".to_string(),
            r"\b(?:1\d{3}|20\d{2})\b".to_string(),
        ]
    }

    /// All matches, with overlaps resolved in favour of the longer span
    pub fn find(&self, sentence: &str) -> Vec<Span> {
        let mut candidates: Vec<Span> = self
            .patterns
            .iter()
            .flat_map(|(regex, label)| {
                regex
                    .find_iter(sentence)
                    .map(|m| Span::new(m.as_str(), *label, m.start()))
            })
            .collect();

        // Longest first, ties to the earlier start
        candidates.sort_by(|a, b| {
            b.text
                .len()
                .cmp(&a.text.len())
                .then_with(|| a.start.cmp(&b.start))
        });

        let mut spans: Vec<Span> = Vec::new();
        for candidate in candidates {
            if !spans.iter().any(|kept| kept.overlaps(&candidate)) {
                spans.push(candidate);
            }
        }

        spans.sort_by_key(|span| span.start);
        spans
    }
}

#[async_trait]
impl EntityRecognizer for GazetteerRecognizer {
    async fn recognize(&self, sentence: &str) -> Result<Vec<Span>> {
        Ok(self.find(sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> GazetteerRecognizer {
        GazetteerRecognizer::new(&default_entries()).unwrap()
    }

    #[test]
    fn test_dictionary_and_year() {
        let spans = recognizer().find("Rotting Christ played in Athens in 1993");

        assert_eq!(
            spans,
            vec![
                Span::new("Athens", EntityLabel::Gpe, 25),
                Span::new("1993", EntityLabel::Date, 35),
            ]
        );
    }

    #[test]
    fn test_greek_aliases_keep_surface_form() {
        let spans = recognizer().find("Έπαιξαν στο κέντρο της Αθήνας και στην κρήτη.");

        let found: Vec<_> = spans.iter().map(|s| (s.text.as_str(), s.label)).collect();
        assert_eq!(
            found,
            vec![("Αθήνας", EntityLabel::Gpe), ("κρήτη", EntityLabel::Loc)]
        );
    }

    #[test]
    fn test_longest_date_wins() {
        let spans = recognizer().find("Η συναυλία έγινε στις 12 Μαΐου 1995.");

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "12 Μαΐου 1995");
        assert_eq!(spans[0].label, EntityLabel::Date);
    }

    #[test]
    fn test_later_longer_hit_beats_earlier_shorter_one() {
        let recognizer = GazetteerRecognizer::new(&[
            GazetteerEntry::new("Dark Nova", EntityLabel::Org, &[]),
            GazetteerEntry::new("Nova Records Athens", EntityLabel::Org, &[]),
        ])
        .unwrap();

        let spans = recognizer.find("Dark Nova Records Athens");
        assert_eq!(spans, vec![Span::new("Nova Records Athens", EntityLabel::Org, 5)]);
    }

    #[test]
    fn test_non_overlapping_hits_stay_in_sentence_order() {
        let spans = recognizer().find("Το 1994 στην Αθήνα");

        let found: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(found, vec!["1994", "Αθήνα"]);
    }

    #[test]
    fn test_no_match_inside_words() {
        let spans = recognizer().find("Οι Αθηναίοι ήρθαν, ήταν 19930 άτομα.");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_custom_entries() {
        let recognizer = GazetteerRecognizer::new(&[
            GazetteerEntry::new("Gagarin 205", EntityLabel::Org, &[]),
            GazetteerEntry::new("  ", EntityLabel::Loc, &[]),
        ])
        .unwrap();

        let spans = recognizer.find("Live at Gagarin 205.");
        assert_eq!(spans, vec![Span::new("Gagarin 205", EntityLabel::Org, 8)]);
    }

    #[tokio::test]
    async fn test_recognize_delegates_to_find() {
        let spans = recognizer().recognize("Greece, 2001").await.unwrap();
        assert_eq!(spans.len(), 2);
    }
}
