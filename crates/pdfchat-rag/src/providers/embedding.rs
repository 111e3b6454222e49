//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings.
///
/// Document and query embedding are separate operations because hosted
/// models (Cohere among them) embed passages and queries differently;
/// both must land in the same vector space for retrieval to be
/// meaningful, so an index is only ever queried through the provider
/// that built it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed passage texts for indexing; one vector per input, same order
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a retrieval query into the same space as the documents
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensions (384 for embed-english-light-v3.0)
    fn dimensions(&self) -> usize;

    /// Embedding model identifier, recorded on the index it builds
    fn model(&self) -> &str;

    /// Provider name for logging
    fn name(&self) -> &str;
}
