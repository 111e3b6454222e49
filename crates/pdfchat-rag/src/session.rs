//! Session context owning the vector index and the conversation
//!
//! One `ChatSession` per user session. `process` and `ask` take
//! `&mut self`, so overlapping actions are unrepresentable and no
//! locking is needed. Nothing here survives the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::IngestPipeline;
use crate::providers::{CohereProvider, EmbeddingProvider, LlmProvider};
use crate::retrieval::{IndexBuilder, Retriever, VectorIndex};
use crate::types::{ConversationMessage, DocumentSummary, PdfDocument};

/// Outcome of one process action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Per-document extraction bookkeeping, in upload order
    pub documents: Vec<DocumentSummary>,
    /// Total extracted characters
    pub characters: usize,
    /// Chunks embedded into the new index
    pub chunks: usize,
}

/// Single-user chat-over-documents session
pub struct ChatSession {
    config: RagConfig,
    ingest: IngestPipeline,
    builder: IndexBuilder,
    retriever: Retriever,
    llm: Arc<dyn LlmProvider>,
    index: Option<Box<dyn VectorIndex>>,
    messages: Vec<ConversationMessage>,
}

impl ChatSession {
    /// Create a session wired to Cohere for both embeddings and
    /// generation (one shared client).
    pub fn new(config: RagConfig) -> Self {
        let (embedder, llm) = CohereProvider::new(&config).split();
        Self::with_providers(config, Arc::new(embedder), Arc::new(llm))
    }

    /// Create a session with explicit providers (tests, alternative
    /// backends). The embedder is used for both the build and the
    /// query path, which keeps the embedding space consistent.
    pub fn with_providers(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let ingest = IngestPipeline::from_config(&config.chunking);
        let builder = IndexBuilder::new(Arc::clone(&embedder), config.embedding.batch_size);
        let retriever = Retriever::new(embedder, config.retrieval.top_k);

        Self {
            config,
            ingest,
            builder,
            retriever,
            llm,
            index: None,
            messages: Vec::new(),
        }
    }

    /// Extract, chunk, embed, and replace the session index.
    ///
    /// The previous index stays in place until the new one is fully
    /// built; on any failure it remains usable (or absent, if none
    /// existed).
    pub async fn process(&mut self, documents: &[PdfDocument]) -> Result<ProcessReport> {
        let (extraction, chunks) = self.ingest.ingest(documents)?;

        tracing::info!(
            documents = documents.len(),
            characters = extraction.text.len(),
            chunks = chunks.len(),
            "processing upload batch"
        );

        let report = ProcessReport {
            documents: extraction.documents,
            characters: extraction.text.len(),
            chunks: chunks.len(),
        };

        let index = self.builder.build(chunks).await?;
        self.index = Some(Box::new(index));

        Ok(report)
    }

    /// Answer a question against the current index.
    ///
    /// The user message is recorded first, so the transcript keeps the
    /// question even when retrieval or generation fails; the assistant
    /// reply is appended only on success.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        self.messages.push(ConversationMessage::user(question));

        let index = self.index.as_deref().ok_or(Error::NoIndex)?;
        let results = self.retriever.retrieve(index, question, None).await?;

        let texts: Vec<&str> = results.iter().map(|r| r.chunk.content.as_str()).collect();
        let context = PromptBuilder::build_context(&texts);

        let answer = self.llm.generate_answer(question, &context).await?;
        self.messages.push(ConversationMessage::assistant(answer.clone()));

        Ok(answer)
    }

    /// The session transcript, oldest first
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Whether a process action has completed successfully
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }
}
