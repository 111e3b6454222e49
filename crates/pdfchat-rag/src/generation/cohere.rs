//! Cohere API client for embeddings and chat generation

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{CohereConfig, EmbeddingConfig};
use crate::error::{Error, Result};

/// Embedding input type; passages and queries are embedded differently
/// but into the same space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    SearchDocument,
    SearchQuery,
}

/// Cohere API client
pub struct CohereClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: CohereConfig,
    /// Embedding model name
    embed_model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: InputType,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    preamble: &'a str,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    text: String,
}

impl CohereClient {
    /// Create a new Cohere client
    pub fn new(config: &CohereConfig, embedding: &EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
            embed_model: embedding.model.clone(),
        }
    }

    /// The credential is checked at first use, not at construction
    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::config("COHERE_API_KEY is not set"))
    }

    /// Embed a batch of texts; response vectors are in input order
    pub async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>> {
        let key = self.api_key()?;
        let url = format!("{}/v1/embed", self.config.base_url);

        let request = EmbedRequest {
            model: &self.embed_model,
            texts,
            input_type,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Embedding failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Embedding service returned {} vectors for {} inputs",
                parsed.embeddings.len(),
                texts.len()
            )));
        }

        Ok(parsed.embeddings)
    }

    /// Send one stateless chat request and return the raw response text
    pub async fn chat(&self, message: &str, preamble: &str) -> Result<String> {
        let key = self.api_key()?;
        let url = format!("{}/v1/chat", self.config.base_url);

        let request = ChatRequest {
            model: &self.config.generate_model,
            message,
            preamble,
            temperature: self.config.temperature,
        };

        tracing::info!(model = %self.config.generate_model, "generating answer");

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("Failed to parse generation response: {}", e)))?;

        Ok(parsed.text)
    }
}
