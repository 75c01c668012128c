use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::prompt;
use crate::recognizer::{EntityRecognizer, RecognizerConfig};
use crate::schema::{EntityLabel, Span};

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

/// Non-streaming `/api/generate` body with JSON output forced
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'static str,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Ollama HTTP client")?;

        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    /// One completion; labelling runs at temperature 0 so reruns agree
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
            options: GenerateOptions { temperature: 0.0 },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context(format!("Ollama unreachable at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama returned {} for model {}: {}", status, self.model, body.trim());
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Malformed Ollama generate response")?;

        debug!(model = %self.model, chars = generated.response.len(), "Ollama completion");
        Ok(generated.response)
    }

    /// Generate with retry for invalid JSON
    pub async fn generate_json_with_retry(
        &self,
        prompt: &str,
        max_retries: usize,
    ) -> Result<String> {
        let attempts = max_retries.max(1);

        for attempt in 0..attempts {
            let response = self.generate(prompt).await?;

            if serde_json::from_str::<serde_json::Value>(&response).is_ok() {
                return Ok(response);
            }

            // If invalid, retry with correction prompt
            if attempt < attempts - 1 {
                warn!(attempt = attempt + 1, "Ollama returned invalid JSON, asking for a fix");

                let corrected = self.generate(&prompt::build_retry_prompt(&response)).await?;
                if serde_json::from_str::<serde_json::Value>(&corrected).is_ok() {
                    return Ok(corrected);
                }
            }
        }

        anyhow::bail!("Failed to get valid JSON after {} retries", attempts)
    }
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    entities: Vec<RecognizedEntity>,
}

#[derive(Debug, Deserialize)]
struct RecognizedEntity {
    text: String,
    label: String,
}

/// Recognizer backed by a local Ollama model
pub struct OllamaRecognizer {
    client: OllamaClient,
    max_retries: usize,
}

impl OllamaRecognizer {
    pub fn new(client: OllamaClient, max_retries: usize) -> Self {
        Self {
            client,
            max_retries,
        }
    }

    pub fn from_config(config: &RecognizerConfig) -> Result<Self> {
        let client = OllamaClient::new(
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(Self::new(client, config.max_retries))
    }

    /// Keep only entities with a known label that occur verbatim in the sentence
    fn ground(sentence: &str, result: RecognitionResult) -> Vec<Span> {
        let mut spans = Vec::new();

        for entity in result.entities {
            let text = entity.text.trim();
            if text.is_empty() {
                continue;
            }

            let Some(label) = EntityLabel::from_tag(&entity.label) else {
                debug!(text, label = %entity.label, "Dropping entity with unknown label");
                continue;
            };

            let Some(start) = sentence.find(text) else {
                debug!(text, "Dropping entity not found in sentence");
                continue;
            };

            spans.push(Span::new(text, label, start));
        }

        spans.sort_by_key(|span| span.start);
        spans
    }
}

#[async_trait]
impl EntityRecognizer for OllamaRecognizer {
    async fn recognize(&self, sentence: &str) -> Result<Vec<Span>> {
        let prompt = prompt::build_recognition_prompt(sentence);

        let json_str = self
            .client
            .generate_json_with_retry(&prompt, self.max_retries)
            .await
            .context("Failed to recognize entities after retries")?;

        let result: RecognitionResult =
            serde_json::from_str(&json_str).context("Failed to parse recognition result")?;

        Ok(Self::ground(sentence, result))
    }
}
