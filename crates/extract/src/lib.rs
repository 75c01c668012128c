pub mod bands;
pub mod gazetteer;
pub mod llm;
pub mod normalizer;
pub mod prompt;
pub mod recognizer;
pub mod schema;
pub mod vocabulary;

pub use bands::BandMatcher;
pub use gazetteer::{GazetteerEntry, GazetteerRecognizer};
pub use llm::{OllamaClient, OllamaRecognizer};
pub use normalizer::{normalize_key, title_case};
pub use recognizer::{EntityRecognizer, RecognizerConfig, RecognizerKind};
pub use schema::{Entity, EntityLabel, Span};
pub use vocabulary::Vocabulary;

use anyhow::Result;

/// Build the recognizer selected by the config
pub fn build_recognizer(config: &RecognizerConfig) -> Result<Box<dyn EntityRecognizer>> {
    Ok(match config.kind {
        RecognizerKind::Gazetteer => Box::new(GazetteerRecognizer::new(&config.gazetteer)?),
        RecognizerKind::Ollama => Box::new(OllamaRecognizer::from_config(config)?),
    })
}
