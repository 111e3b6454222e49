//! Error types for the chat-over-documents pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed PDF stream; fails the whole upload batch
    #[error("Failed to read document '{name}': {message}")]
    DocumentRead { name: String, message: String },

    /// Embedding service failure during index build or query
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Question asked before any successful process action
    #[error("No document index available, process documents first")]
    NoIndex,

    /// Remote generation call failure
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a document read error
    pub fn document_read(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DocumentRead {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
