use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::gazetteer::{default_entries, GazetteerEntry};
use crate::schema::Span;

/// The NLP boundary: finds entity spans in a single sentence
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, sentence: &str) -> Result<Vec<Span>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerKind {
    #[default]
    Gazetteer, // Offline dictionary + date patterns
    Ollama,    // Local LLM
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub kind: RecognizerKind,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub gazetteer: Vec<GazetteerEntry>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            kind: RecognizerKind::Gazetteer,
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            timeout_secs: 60,
            max_retries: 3,
            gazetteer: default_entries(),
        }
    }
}
