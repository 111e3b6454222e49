//! Document ingestion: PDF text extraction and chunking

pub mod chunker;
pub mod extractor;

pub use chunker::TextChunker;
pub use extractor::{Extraction, PdfExtractor};

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, PdfDocument};

/// Extraction and chunking composed, one call per process action
pub struct IngestPipeline {
    chunker: TextChunker,
}

impl IngestPipeline {
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self {
            chunker: TextChunker::from_config(config),
        }
    }

    /// Extract the upload batch into one text stream and split it into
    /// chunks ready for embedding.
    pub fn ingest(&self, documents: &[PdfDocument]) -> Result<(Extraction, Vec<Chunk>)> {
        let extraction = PdfExtractor::extract(documents)?;
        let chunks = self.chunker.split(&extraction.text);
        Ok((extraction, chunks))
    }
}
