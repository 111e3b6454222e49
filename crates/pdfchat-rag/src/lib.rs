//! pdfchat-rag: chat-over-documents pipeline for PDF uploads
//!
//! This crate turns a set of uploaded PDF byte-streams into a semantic
//! index and answers natural-language questions against it: linear text
//! extraction, recursive overlap-aware chunking, embedding via a hosted
//! model, brute-force nearest-neighbor retrieval, and grounded answer
//! generation through a chat completion API.
//!
//! The UI is an external caller. It hands [`ChatSession`] a list of PDF
//! byte-streams plus questions and gets back a process report, ranked
//! chunks, and answer strings. All state (the vector index and the
//! conversation transcript) lives in the session and dies with it.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod session;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use session::{ChatSession, ProcessReport};
pub use types::{Chunk, ConversationMessage, PdfDocument, Role};
