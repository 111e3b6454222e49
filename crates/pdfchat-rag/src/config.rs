//! Configuration for the chat-over-documents pipeline

use serde::{Deserialize, Serialize};

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    pub embedding: EmbeddingConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Cohere API configuration
    pub cohere: CohereConfig,
}

impl RagConfig {
    /// Build a configuration from defaults plus the process environment.
    ///
    /// Only the API key comes from the environment (`COHERE_API_KEY`).
    /// A missing key is not an error here: it becomes a `Config` error
    /// at the first remote call.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.cohere.api_key = std::env::var("COHERE_API_KEY").ok();
        config
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in bytes
    pub chunk_size: usize,
    /// Overlap carried between adjacent chunks in bytes
    pub chunk_overlap: usize,
    /// Separators in priority order; a hard byte split is the implicit
    /// terminal fallback
    pub separators: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            separators: vec!["\n".to_string(), ".".to_string(), ",".to_string()],
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (384 for embed-english-light-v3.0)
    pub dimensions: usize,
    /// Texts per embedding request (Cohere caps a request at 96)
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "embed-english-light-v3.0".to_string(),
            dimensions: 384,
            batch_size: 96,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per question
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Cohere API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereConfig {
    /// API base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API key; read from `COHERE_API_KEY` by [`RagConfig::from_env`].
    /// Checked at the first remote call, not at load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cohere.com".to_string(),
            generate_model: "command-r".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
            api_key: None,
        }
    }
}
