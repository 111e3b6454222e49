//! End-to-end session tests with mock providers and generated PDFs
//!
//! PDFs are built in-memory with lopdf so the extraction path runs for
//! real; embeddings and generation are deterministic mocks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdfchat_rag::config::RagConfig;
use pdfchat_rag::error::{Error, Result};
use pdfchat_rag::providers::{EmbeddingProvider, LlmProvider};
use pdfchat_rag::{ChatSession, PdfDocument, Role};

// ----------------------------------------------------------------------------
// PDF fixture
// ----------------------------------------------------------------------------

/// Build a PDF with one page per entry; an empty entry becomes a page
/// with no text (stand-in for a scanned image page).
fn pdf_with_pages(pages_text: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages_text {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

// ----------------------------------------------------------------------------
// Mock providers
// ----------------------------------------------------------------------------

const KEYWORDS: [&str; 3] = ["storage", "network", "billing"];

fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .map(|kw| lower.matches(kw).count() as f32)
        .collect()
}

/// Deterministic keyword-count embedder; document embedding can be
/// toggled to fail to exercise the atomic-rebuild contract.
#[derive(Default)]
struct KeywordEmbedder {
    fail_documents: AtomicBool,
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.fail_documents.load(Ordering::SeqCst) {
            return Err(Error::embedding("embedding service unavailable"));
        }
        Ok(texts.iter().map(|t| keyword_vector(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(keyword_vector(text))
    }

    fn dimensions(&self) -> usize {
        KEYWORDS.len()
    }

    fn model(&self) -> &str {
        "keyword-test"
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Returns the assembled context verbatim so tests can inspect it
struct EchoLlm;

#[async_trait]
impl LlmProvider for EchoLlm {
    async fn generate_answer(&self, _question: &str, context: &str) -> Result<String> {
        Ok(context.to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "echo"
    }
}

struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn generate_answer(&self, _question: &str, _context: &str) -> Result<String> {
        Err(Error::generation("chat endpoint returned HTTP 503"))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "failing"
    }
}

fn test_config() -> RagConfig {
    let mut config = RagConfig::default();
    config.embedding.dimensions = KEYWORDS.len();
    config
}

fn session_with(llm: Arc<dyn LlmProvider>) -> ChatSession {
    ChatSession::with_providers(test_config(), Arc::new(KeywordEmbedder::default()), llm)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[tokio::test]
async fn ask_before_process_is_a_no_index_error() {
    let mut session = session_with(Arc::new(EchoLlm));

    let err = session.ask("what does the contract say?").await.unwrap_err();
    assert!(matches!(err, Error::NoIndex));

    // The question is kept in the transcript, with no assistant reply
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].role, Role::User);
    assert!(!session.has_index());
}

#[tokio::test]
async fn process_then_ask_round_trip() {
    let mut session = session_with(Arc::new(EchoLlm));

    let docs = vec![
        PdfDocument::new(
            "infra.pdf",
            pdf_with_pages(&[
                "The storage layer keeps all uploads on local disk.",
                "The network layer moves bytes between replicas.",
            ]),
        ),
        PdfDocument::new(
            "finance.pdf",
            pdf_with_pages(&["Billing runs monthly and invoices are emailed."]),
        ),
    ];

    let report = session.process(&docs).await.unwrap();
    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.documents[0].pages, 2);
    assert_eq!(report.documents[0].pages_with_text, 2);
    assert!(report.characters > 0);
    assert!(report.chunks >= 1);
    assert!(session.has_index());

    let answer = session.ask("how does storage work?").await.unwrap();

    // EchoLlm returns the context: labeled, rank 0 first, storage on top
    assert!(answer.starts_with("\nExtracted documents:\n"));
    assert!(answer.contains("Document 0:::"));
    assert!(answer.contains("storage"));

    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].role, Role::Assistant);
}

#[tokio::test]
async fn text_less_pages_are_skipped_silently() {
    let mut session = session_with(Arc::new(EchoLlm));

    let docs = vec![PdfDocument::new(
        "scanned.pdf",
        pdf_with_pages(&["The storage section.", "", "The billing section."]),
    )];

    let report = session.process(&docs).await.unwrap();
    assert_eq!(report.documents[0].pages, 3);
    assert_eq!(report.documents[0].pages_with_text, 2);
}

#[tokio::test]
async fn all_image_upload_fails_with_nothing_to_index() {
    let mut session = session_with(Arc::new(EchoLlm));

    let docs = vec![PdfDocument::new("scan.pdf", pdf_with_pages(&["", ""]))];
    let err = session.process(&docs).await.unwrap_err();

    match err {
        Error::Embedding(message) => assert!(message.contains("nothing to index")),
        other => panic!("expected Embedding, got {other:?}"),
    }
    assert!(!session.has_index());
}

#[tokio::test]
async fn malformed_pdf_fails_the_batch() {
    let mut session = session_with(Arc::new(EchoLlm));

    let docs = vec![
        PdfDocument::new("ok.pdf", pdf_with_pages(&["Fine storage text."])),
        PdfDocument::new("broken.pdf", b"%PDF-???garbage".to_vec()),
    ];

    let err = session.process(&docs).await.unwrap_err();
    assert!(matches!(err, Error::DocumentRead { .. }));
    assert!(!session.has_index());
}

#[tokio::test]
async fn failed_rebuild_keeps_the_previous_index() {
    let embedder = Arc::new(KeywordEmbedder::default());
    let mut session = ChatSession::with_providers(
        test_config(),
        Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
        Arc::new(EchoLlm),
    );

    let docs = vec![PdfDocument::new(
        "v1.pdf",
        pdf_with_pages(&["Original storage documentation."]),
    )];
    session.process(&docs).await.unwrap();

    // Second process action fails at the embedding service
    embedder.fail_documents.store(true, Ordering::SeqCst);
    let replacement = vec![PdfDocument::new(
        "v2.pdf",
        pdf_with_pages(&["Replacement network documentation."]),
    )];
    assert!(session.process(&replacement).await.is_err());

    // The first index is still in place and still answers
    assert!(session.has_index());
    let answer = session.ask("tell me about storage").await.unwrap();
    assert!(answer.contains("Original storage documentation"));
}

#[tokio::test]
async fn generation_failure_keeps_the_question_only() {
    let mut session = session_with(Arc::new(FailingLlm));

    let docs = vec![PdfDocument::new(
        "doc.pdf",
        pdf_with_pages(&["Some storage content."]),
    )];
    session.process(&docs).await.unwrap();

    let err = session.ask("what about storage?").await.unwrap_err();
    assert!(matches!(err, Error::Generation(_)));

    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "what about storage?");
}

#[tokio::test]
async fn repeated_questions_are_idempotent_against_an_unchanged_index() {
    let mut session = session_with(Arc::new(EchoLlm));

    let docs = vec![PdfDocument::new(
        "doc.pdf",
        pdf_with_pages(&[
            "Storage handles disks.",
            "Network handles packets.",
            "Billing handles invoices.",
        ]),
    )];
    session.process(&docs).await.unwrap();

    let first = session.ask("network details?").await.unwrap();
    let second = session.ask("network details?").await.unwrap();
    assert_eq!(first, second);
}
