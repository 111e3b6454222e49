//! Core data types for documents, chunks, and the conversation transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded PDF: a named byte-stream.
///
/// Ephemeral and input-only; the bytes are dropped after text
/// extraction. The name is used for error reporting and logging, never
/// for retrieval.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    /// Display name (usually the uploaded filename)
    pub name: String,
    /// Raw PDF bytes
    pub data: Vec<u8>,
}

impl PdfDocument {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Per-document bookkeeping produced during extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Unique document ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// File size in bytes
    pub bytes: u64,
    /// SHA-256 of the raw bytes
    pub sha256: String,
    /// Total pages in the document
    pub pages: u32,
    /// Pages that contributed text (image-only pages are skipped)
    pub pages_with_text: u32,
}

/// A bounded contiguous span of the extracted text, the unit of
/// embedding and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, a boundary-trimmed verbatim slice of the source
    pub content: String,
    /// Byte offset of the first retained character in the source text
    pub start_index: usize,
}

impl Chunk {
    pub fn new(content: impl Into<String>, start_index: usize) -> Self {
        Self {
            content: content.into(),
            start_index,
        }
    }
}

/// Conversation roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the session transcript; append-only, session-scoped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    /// Create a user message stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant message stamped now
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
