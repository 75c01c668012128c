use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

use crate::normalizer::{normalize_key, title_case};
use crate::schema::{EntityLabel, Span};
use crate::vocabulary::Vocabulary;

/// Finds known band names in a sentence, independent of the recognizer
pub struct BandMatcher {
    pattern: Option<Regex>,
}

impl BandMatcher {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let mut names: Vec<&str> = vocabulary
            .bands
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect();

        if names.is_empty() {
            return Self { pattern: None };
        }

        // Longest first so "thou art lord" is not cut short by a shorter prefix
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));

        let alternation = names
            .iter()
            .map(|name| regex::escape(name).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = match Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(error = %e, "Band pattern rejected, band detection disabled");
                None
            }
        };

        Self { pattern }
    }

    /// One BAND span per distinct band in the sentence, title-cased
    pub fn find(&self, sentence: &str) -> Vec<Span> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        pattern
            .find_iter(sentence)
            .filter(|m| seen.insert(normalize_key(m.as_str())))
            .map(|m| {
                let canonical = normalize_key(m.as_str());
                Span::covering(title_case(&canonical), EntityLabel::Band, m.range())
            })
            .collect()
    }
}
