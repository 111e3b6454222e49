//! Vector index abstraction and the in-memory brute-force implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched chunk, text verbatim and untruncated
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more similar)
    pub similarity: f32,
}

/// Nearest-neighbor search over embedded chunks.
///
/// Implementations:
/// - [`InMemoryIndex`]: brute-force scan, sufficient at session scale
/// - an external index can slot in behind the same trait
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return the `top_k` nearest chunks; ties broken by chunk order
    /// (earlier start offset wins). Fewer indexed chunks than `top_k`
    /// returns all of them. No relevance threshold is applied.
    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Number of indexed chunks
    fn len(&self) -> usize;

    /// Check if the index holds no chunks
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimensions of the indexed vectors
    fn dimensions(&self) -> usize;

    /// Embedding model that produced the vectors
    fn model(&self) -> &str;

    /// Index name for logging
    fn name(&self) -> &str;
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// Brute-force in-memory index, rebuilt wholesale per process action
#[derive(Debug)]
pub struct InMemoryIndex {
    model: String,
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if query.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "Query vector has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(ord, entry)| (ord, cosine_similarity(query, &entry.embedding)))
            .collect();

        // Highest similarity first; the earlier chunk wins ties
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(ord, similarity)| SearchResult {
                chunk: self.entries[ord].chunk.clone(),
                similarity,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Embeds chunks and builds a fresh [`InMemoryIndex`].
///
/// All-or-nothing: any embedding failure discards the partial build, so
/// a half-embedded index is never observable. The caller replaces its
/// previous index only on success.
pub struct IndexBuilder {
    embedder: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
}

impl IndexBuilder {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, batch_size: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed `chunks` in batches and assemble the index.
    ///
    /// An empty chunk list is rejected ("nothing to index") so an empty
    /// index is never built.
    pub async fn build(&self, chunks: Vec<Chunk>) -> Result<InMemoryIndex> {
        if chunks.is_empty() {
            return Err(Error::embedding("nothing to index"));
        }

        let dimensions = self.embedder.dimensions();
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(chunks.len());

        for batch in texts.chunks(self.batch_size) {
            let vectors = self.embedder.embed_documents(batch).await?;
            for vector in &vectors {
                if vector.len() != dimensions {
                    return Err(Error::embedding(format!(
                        "Embedding service returned {} dimensions, expected {}",
                        vector.len(),
                        dimensions
                    )));
                }
            }
            embeddings.extend(vectors);
        }

        tracing::info!(
            chunks = chunks.len(),
            model = self.embedder.model(),
            "built vector index"
        );

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        Ok(InMemoryIndex {
            model: self.embedder.model().to_string(),
            dimensions,
            entries,
        })
    }
}
