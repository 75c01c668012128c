use extract::{normalize_key, title_case, Entity, EntityLabel, Span, Vocabulary};
use geocode::LocationVerifier;
use tracing::debug;

/// Labels each detected span certain or uncertain
pub struct CertaintyClassifier {
    vocabulary: Vocabulary,
    verifier: LocationVerifier,
}

impl CertaintyClassifier {
    pub fn new(vocabulary: Vocabulary, verifier: LocationVerifier) -> Self {
        Self {
            vocabulary,
            verifier,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn verifier(&self) -> &LocationVerifier {
        &self.verifier
    }

    /// Band names are always certain BANDs, title-cased. Places are certain when the sentence
    /// has an indicator word, else when geocoding finds them. Everything else is certain.
    pub async fn classify(&self, span: &Span, sentence: &str) -> Entity {
        if self.vocabulary.is_band(&span.text) {
            let canonical = title_case(&normalize_key(&span.text));
            return Entity::new(canonical, EntityLabel::Band, true);
        }

        if !span.label.is_place() {
            return Entity::new(span.text.clone(), span.label, true);
        }

        let certain = if self.vocabulary.has_location_indicator(sentence) {
            debug!(text = %span.text, "Location indicator present");
            true
        } else {
            self.verifier.verify(&span.text).await
        };

        Entity::new(span.text.clone(), span.label, certain)
    }
}
