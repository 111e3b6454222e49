//! Provider abstractions for embeddings and answer generation
//!
//! Trait seams keep the embedding model and the search algorithm
//! decoupled; the Cohere implementations are the defaults the session
//! wires in.

pub mod cohere;
pub mod embedding;
pub mod llm;

pub use cohere::{CohereEmbedder, CohereLlm, CohereProvider};
pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
