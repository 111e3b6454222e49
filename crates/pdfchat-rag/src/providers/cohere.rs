//! Cohere-backed providers for embeddings and answer generation
//!
//! Wraps one shared [`CohereClient`] behind both provider traits.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{EmbeddingConfig, RagConfig};
use crate::error::{Error, Result};
use crate::generation::{CohereClient, InputType, PromptBuilder};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Cohere embedding provider (embed-english-light-v3.0 by default)
pub struct CohereEmbedder {
    client: Arc<CohereClient>,
    model: String,
    dimensions: usize,
}

impl CohereEmbedder {
    /// Create a new Cohere embedder with its own client
    pub fn new(config: &RagConfig) -> Self {
        Self::from_client(
            Arc::new(CohereClient::new(&config.cohere, &config.embedding)),
            &config.embedding,
        )
    }

    /// Create from an existing client
    pub fn from_client(client: Arc<CohereClient>, embedding: &EmbeddingConfig) -> Self {
        Self {
            client,
            model: embedding.model.clone(),
            dimensions: embedding.dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for CohereEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.client.embed(texts, InputType::SearchDocument).await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.client.embed(&texts, InputType::SearchQuery).await?;
        vectors
            .pop()
            .ok_or_else(|| Error::embedding("Embedding service returned no vector for the query"))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "cohere"
    }
}

/// Cohere LLM provider for answer generation
pub struct CohereLlm {
    client: Arc<CohereClient>,
    model: String,
}

impl CohereLlm {
    /// Create a new Cohere LLM provider with its own client
    pub fn new(config: &RagConfig) -> Self {
        Self::from_client(
            Arc::new(CohereClient::new(&config.cohere, &config.embedding)),
            config.cohere.generate_model.clone(),
        )
    }

    /// Create from an existing client
    pub fn from_client(client: Arc<CohereClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl LlmProvider for CohereLlm {
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String> {
        let message = PromptBuilder::build_message(question, context);
        self.client.chat(&message, PromptBuilder::INSTRUCTION).await
    }

    fn name(&self) -> &str {
        "cohere"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Combined provider sharing a single client for both seams
pub struct CohereProvider {
    embedder: CohereEmbedder,
    llm: CohereLlm,
}

impl CohereProvider {
    /// Create a new combined Cohere provider
    pub fn new(config: &RagConfig) -> Self {
        let client = Arc::new(CohereClient::new(&config.cohere, &config.embedding));
        Self {
            embedder: CohereEmbedder::from_client(Arc::clone(&client), &config.embedding),
            llm: CohereLlm::from_client(client, config.cohere.generate_model.clone()),
        }
    }

    /// Split into separate providers
    pub fn split(self) -> (CohereEmbedder, CohereLlm) {
        (self.embedder, self.llm)
    }
}
