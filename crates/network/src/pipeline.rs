use anyhow::{Context, Result};
use extract::{BandMatcher, Entity, EntityRecognizer, Span};
use ingest::Document;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::classifier::CertaintyClassifier;
use crate::connection::{build_connections, Connection};
use crate::registry::{EntityRegistry, MergePolicy};

/// One classified occurrence of an entity and the sentence it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub entity: Entity,
    pub context: String,
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub mentions: Vec<Mention>,
    pub entities: EntityRegistry,
    pub connections: Vec<Connection>,
}

/// Sentence -> spans -> classified entities -> connections
pub struct Pipeline {
    recognizer: Box<dyn EntityRecognizer>,
    band_matcher: BandMatcher,
    classifier: CertaintyClassifier,
    policy: MergePolicy,
    places_only: bool,
}

impl Pipeline {
    pub fn new(
        recognizer: Box<dyn EntityRecognizer>,
        classifier: CertaintyClassifier,
        policy: MergePolicy,
    ) -> Self {
        let band_matcher = BandMatcher::new(classifier.vocabulary());
        Self {
            recognizer,
            band_matcher,
            classifier,
            policy,
            places_only: false,
        }
    }

    /// Only LOC/GPE spans, no band detection, band names skipped
    pub fn places_only(mut self) -> Self {
        self.places_only = true;
        self
    }

    /// Entities of one sentence, ordered by position, one per distinct text
    pub async fn detect(&self, sentence: &str) -> Result<Vec<Span>> {
        let recognized = self.recognizer.recognize(sentence).await?;

        let mut spans = if self.places_only {
            let vocabulary = self.classifier.vocabulary();
            recognized
                .into_iter()
                .filter(|s| s.label.is_place() && !vocabulary.is_band(&s.text))
                .collect()
        } else {
            let bands = self.band_matcher.find(sentence);
            let mut spans = bands.clone();
            spans.extend(
                recognized
                    .into_iter()
                    .filter(|s| !bands.iter().any(|b| b.overlaps(s))),
            );
            spans
        };

        spans.sort_by_key(|s| s.start);

        let mut seen = HashSet::new();
        spans.retain(|s| seen.insert(s.text.clone()));

        Ok(spans)
    }

    pub async fn analyze(&self, document: &Document) -> Result<Analysis> {
        let mut analysis = Analysis {
            entities: EntityRegistry::new(self.policy),
            ..Analysis::default()
        };

        for sentence in &document.sentences {
            let spans = self
                .detect(&sentence.text)
                .await
                .context(format!("Entity detection failed on sentence {}", sentence.index))?;

            debug!(sentence = sentence.index, spans = spans.len(), "Detected entities");

            let mut resolved: Vec<Entity> = Vec::with_capacity(spans.len());
            let mut seen = HashSet::new();
            for span in &spans {
                let entity = self.classifier.classify(span, &sentence.text).await;

                // Classifying can fold two spans onto one band name
                if !seen.insert(entity.text.clone()) {
                    debug!(
                        text = %entity.text,
                        sentence = sentence.index,
                        "Folded duplicate mention"
                    );
                    continue;
                }

                analysis.mentions.push(Mention {
                    entity: entity.clone(),
                    context: sentence.text.clone(),
                });
                resolved.push(analysis.entities.register(entity).clone());
            }

            analysis
                .connections
                .extend(build_connections(&resolved, &sentence.text));
        }

        let stats = self.classifier.verifier().stats();
        info!(
            doc_id = %document.doc_id,
            sentences = document.sentences.len(),
            entities = analysis.entities.len(),
            connections = analysis.connections.len(),
            geocode_lookups = stats.lookups,
            geocode_cache_hits = stats.cache_hits,
            geocode_failures = stats.failures,
            "Analysis complete"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use extract::{EntityLabel, Vocabulary};
    use geocode::{Geocoder, LocationVerifier, StaticGeocoder};
    use std::collections::HashMap;
    use std::time::Duration;

    /// Returns canned spans keyed by sentence text
    pub(crate) struct StubRecognizer {
        pub spans: HashMap<String, Vec<(&'static str, EntityLabel)>>,
    }

    #[async_trait]
    impl EntityRecognizer for StubRecognizer {
        async fn recognize(&self, sentence: &str) -> Result<Vec<Span>> {
            let Some(found) = self.spans.get(sentence) else {
                return Ok(Vec::new());
            };

            Ok(found
                .iter()
                .filter_map(|(text, label)| {
                    sentence.find(text).map(|start| Span::new(*text, *label, start))
                })
                .collect())
        }
    }

    pub(crate) struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn resolve(&self, _name: &str) -> Result<bool> {
            anyhow::bail!("operation timed out")
        }
    }

    pub(crate) fn pipeline(
        spans: Vec<(&str, Vec<(&'static str, EntityLabel)>)>,
        geocoder: Box<dyn Geocoder>,
        policy: MergePolicy,
    ) -> Pipeline {
        let recognizer = StubRecognizer {
            spans: spans
                .into_iter()
                .map(|(sentence, found)| (sentence.to_string(), found))
                .collect(),
        };
        let verifier = LocationVerifier::new(geocoder, Duration::from_secs(1));
        let classifier = CertaintyClassifier::new(Vocabulary::default(), verifier);
        Pipeline::new(Box::new(recognizer), classifier, policy)
    }

    pub(crate) fn document(text: &str) -> Document {
        Document::new("vatsnies.txt".to_string(), text.to_string())
    }

    #[tokio::test]
    async fn test_example_sentence_with_geocoding() {
        let sentence = "Rotting Christ played in Athens in 1993.";
        let pipeline = pipeline(
            vec![(
                sentence,
                vec![("Athens", EntityLabel::Gpe), ("1993", EntityLabel::Date)],
            )],
            Box::new(StaticGeocoder::new(["Athens"])),
            MergePolicy::FirstWins,
        );

        let analysis = pipeline.analyze(&document(sentence)).await.unwrap();

        let pairs: Vec<_> = analysis
            .connections
            .iter()
            .map(|c| (c.source.as_str(), c.target.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Rotting Christ", "Athens"),
                ("Rotting Christ", "1993"),
                ("Athens", "1993"),
            ]
        );

        let entities: Vec<_> = analysis.entities.iter().cloned().collect();
        assert_eq!(
            entities,
            vec![
                Entity::new("Rotting Christ", EntityLabel::Band, true),
                Entity::new("Athens", EntityLabel::Gpe, true),
                Entity::new("1993", EntityLabel::Date, true),
            ]
        );
    }

    #[tokio::test]
    async fn test_example_sentence_with_failed_geocoding() {
        let sentence = "Rotting Christ played in Athens in 1993.";
        let pipeline = pipeline(
            vec![(
                sentence,
                vec![("Athens", EntityLabel::Gpe), ("1993", EntityLabel::Date)],
            )],
            Box::new(FailingGeocoder),
            MergePolicy::FirstWins,
        );

        let analysis = pipeline.analyze(&document(sentence)).await.unwrap();

        assert_eq!(analysis.connections.len(), 3);
        assert!(!analysis.entities.get("Athens").unwrap().certain);
        assert!(analysis.entities.get("Rotting Christ").unwrap().certain);
        assert!(analysis.entities.get("1993").unwrap().certain);
    }

    #[tokio::test]
    async fn test_recognizer_band_span_is_absorbed() {
        let sentence = "Οι Rotting Christ από την Αθήνα.";
        let pipeline = pipeline(
            vec![(
                sentence,
                vec![("Rotting Christ", EntityLabel::Org), ("Αθήνα", EntityLabel::Gpe)],
            )],
            Box::new(StaticGeocoder::new(["Αθήνα"])),
            MergePolicy::FirstWins,
        );

        let spans = pipeline.detect(sentence).await.unwrap();

        assert_eq!(
            spans,
            vec![
                Span::new("Rotting Christ", EntityLabel::Band, "Οι ".len()),
                Span::new("Αθήνα", EntityLabel::Gpe, "Οι Rotting Christ από την ".len()),
            ]
        );
    }

    #[tokio::test]
    async fn test_extra_whitespace_band_absorbs_inner_span() {
        let sentence = "Rotting       Christ live.";
        let pipeline = pipeline(
            vec![(sentence, vec![("Christ", EntityLabel::Person)])],
            Box::new(FailingGeocoder),
            MergePolicy::FirstWins,
        );

        let spans = pipeline.detect(sentence).await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Rotting Christ");

        let analysis = pipeline.analyze(&document(sentence)).await.unwrap();
        assert_eq!(analysis.entities.len(), 1);
        assert!(analysis.connections.is_empty());
    }

    #[tokio::test]
    async fn test_spans_folding_onto_one_band_yield_one_mention() {
        let sentence = "Οι Kawir και οι KAWIR έπαιξαν.";
        let pipeline = pipeline(
            vec![(sentence, vec![("KAWIR", EntityLabel::Org)])],
            Box::new(FailingGeocoder),
            MergePolicy::FirstWins,
        );

        let analysis = pipeline.analyze(&document(sentence)).await.unwrap();

        let entities: Vec<_> = analysis.entities.iter().cloned().collect();
        assert_eq!(entities, vec![Entity::new("Kawir", EntityLabel::Band, true)]);
        assert!(analysis.connections.is_empty());
        assert_eq!(analysis.mentions.len(), 1);
        assert_eq!(analysis.mentions[0].context, sentence);
    }

    #[tokio::test]
    async fn test_no_connections_across_sentences() {
        let first = "Οι Varathron έπαιξαν.";
        let second = "Η Αθήνα ήταν γεμάτη.";
        let pipeline = pipeline(
            vec![(second, vec![("Αθήνα", EntityLabel::Gpe)])],
            Box::new(FailingGeocoder),
            MergePolicy::FirstWins,
        );

        let analysis = pipeline
            .analyze(&document(&format!("{} {}", first, second)))
            .await
            .unwrap();

        assert_eq!(analysis.entities.len(), 2);
        assert!(analysis.connections.is_empty());
        assert_eq!(analysis.mentions.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_pair_is_not_merged() {
        let first = "Οι Kawir και οι Zemial έπαιξαν.";
        let second = "Οι Zemial και οι Kawir ξανάπαιξαν.";
        let pipeline = pipeline(Vec::new(), Box::new(FailingGeocoder), MergePolicy::FirstWins);

        let analysis = pipeline
            .analyze(&document(&format!("{} {}", first, second)))
            .await
            .unwrap();

        assert_eq!(analysis.connections.len(), 2);
        assert_eq!(analysis.connections[0].context, first);
        assert_eq!(analysis.connections[1].source, "Zemial");
    }

    #[tokio::test]
    async fn test_connection_labels_follow_registry() {
        let first = "Το Gagarin άνοιξε το 2003.";
        let second = "Στο Gagarin έπαιξαν οι Kawir.";
        let pipeline = pipeline(
            vec![
                (first, vec![("Gagarin", EntityLabel::Org), ("2003", EntityLabel::Date)]),
                (second, vec![("Gagarin", EntityLabel::Loc)]),
            ],
            Box::new(FailingGeocoder),
            MergePolicy::FirstWins,
        );

        let analysis = pipeline
            .analyze(&document(&format!("{} {}", first, second)))
            .await
            .unwrap();

        // The mention keeps its own classification, the connection uses the registry's
        assert_eq!(analysis.mentions[2].entity.label, EntityLabel::Loc);
        assert_eq!(analysis.connections[1].source, "Gagarin");
        assert_eq!(analysis.connections[1].source_label, EntityLabel::Org);

        for connection in &analysis.connections {
            let source = analysis.entities.get(&connection.source).unwrap();
            let target = analysis.entities.get(&connection.target).unwrap();
            assert_eq!(source.label, connection.source_label);
            assert_eq!(target.label, connection.target_label);
        }
    }

    #[tokio::test]
    async fn test_places_only() {
        let sentence = "Οι Necromantia έπαιξαν στην Αθήνα το 1994.";
        let pipeline = pipeline(
            vec![(
                sentence,
                vec![
                    ("Necromantia", EntityLabel::Gpe),
                    ("Αθήνα", EntityLabel::Gpe),
                    ("1994", EntityLabel::Date),
                ],
            )],
            Box::new(StaticGeocoder::new(["Αθήνα"])),
            MergePolicy::FirstWins,
        )
        .places_only();

        let analysis = pipeline.analyze(&document(sentence)).await.unwrap();

        let mentions: Vec<_> = analysis.mentions.iter().map(|m| &m.entity).collect();
        assert_eq!(mentions, vec![&Entity::new("Αθήνα", EntityLabel::Gpe, true)]);
    }
}
