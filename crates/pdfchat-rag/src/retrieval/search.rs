//! Query-time retrieval against the session index

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;

use super::index::{SearchResult, VectorIndex};

/// Embeds a query and returns the nearest chunks from an index.
///
/// The query must be embedded by the same model that built the index;
/// the retriever enforces this before spending a remote call.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, top_k: usize) -> Self {
        Self { embedder, top_k }
    }

    /// Retrieve the `k` nearest chunks for `query` (configured default
    /// when `k` is `None`).
    ///
    /// No relevance threshold is applied: deciding that nothing in the
    /// context answers the question belongs to the generator, not the
    /// retriever.
    pub async fn retrieve(
        &self,
        index: &dyn VectorIndex,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<SearchResult>> {
        let k = k.unwrap_or(self.top_k);

        if self.embedder.model() != index.model() {
            return Err(Error::embedding(format!(
                "Index was built with model '{}' but the query embedder is '{}'",
                index.model(),
                self.embedder.model()
            )));
        }

        let query_embedding = self.embedder.embed_query(query).await?;
        let results = index.search(&query_embedding, k).await?;

        tracing::debug!(k, returned = results.len(), "retrieved chunks");

        Ok(results)
    }
}
