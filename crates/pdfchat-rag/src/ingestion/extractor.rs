//! PDF text extraction
//!
//! Page-level, best-effort extraction: pages that error out or carry no
//! text (scanned images) contribute nothing, not even a separator. Only
//! a structurally invalid PDF stream fails, and it fails the whole
//! upload batch.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{DocumentSummary, PdfDocument};

/// Result of one extraction pass over an upload batch
#[derive(Debug, Clone)]
pub struct Extraction {
    /// All pages of all documents concatenated, one newline per page;
    /// no per-document boundary is retained
    pub text: String,
    /// Per-document bookkeeping, in upload order
    pub documents: Vec<DocumentSummary>,
}

/// PDF text extractor
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the concatenated text of an ordered upload batch.
    ///
    /// Documents are processed in upload order, pages in page order. An
    /// unreadable document aborts the batch with `DocumentRead`.
    pub fn extract(documents: &[PdfDocument]) -> Result<Extraction> {
        let mut text = String::new();
        let mut summaries = Vec::with_capacity(documents.len());

        for document in documents {
            summaries.push(Self::extract_document(document, &mut text)?);
        }

        tracing::debug!(
            documents = documents.len(),
            characters = text.len(),
            "extracted upload batch"
        );

        Ok(Extraction {
            text,
            documents: summaries,
        })
    }

    fn extract_document(document: &PdfDocument, out: &mut String) -> Result<DocumentSummary> {
        let parsed = lopdf::Document::load_mem(&document.data)
            .map_err(|e| Error::document_read(&document.name, e.to_string()))?;

        let pages = parsed.get_pages();
        let mut pages_with_text = 0u32;

        for &page_number in pages.keys() {
            let page_text = match parsed.extract_text(&[page_number]) {
                Ok(page_text) => page_text,
                Err(e) => {
                    tracing::debug!(
                        document = %document.name,
                        page = page_number,
                        error = %e,
                        "skipping unextractable page"
                    );
                    continue;
                }
            };

            // Whitespace-only pages are treated as empty
            if page_text.trim().is_empty() {
                continue;
            }

            out.push_str(&page_text);
            out.push('\n');
            pages_with_text += 1;
        }

        let mut hasher = Sha256::new();
        hasher.update(&document.data);

        Ok(DocumentSummary {
            id: Uuid::new_v4(),
            name: document.name.clone(),
            bytes: document.data.len() as u64,
            sha256: hex::encode(hasher.finalize()),
            pages: pages.len() as u32,
            pages_with_text,
        })
    }
}
