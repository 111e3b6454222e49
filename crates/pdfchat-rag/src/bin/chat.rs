//! Interactive chat-over-PDFs CLI
//!
//! Run with: cargo run -p pdfchat-rag --bin pdfchat -- paper.pdf notes.pdf

use std::io::{self, BufRead, Write};

use pdfchat_rag::{ChatSession, Error, PdfDocument, RagConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfchat_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("Usage: pdfchat <file.pdf> [more.pdf ...]");
        std::process::exit(2);
    }

    let config = RagConfig::from_env();
    let mut session = ChatSession::new(config);

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        let data = tokio::fs::read(path).await?;
        documents.push(PdfDocument::new(path.clone(), data));
    }

    println!("📚 Processing {} document(s)...", documents.len());
    let report = session.process(&documents).await?;
    println!(
        "✅ Indexed {} chunks from {} characters of text",
        report.chunks, report.characters
    );
    for document in &report.documents {
        println!(
            "  📄 {} ({} of {} pages with text)",
            document.name, document.pages_with_text, document.pages
        );
    }

    println!("\nAsk a question about your documents (Ctrl-D to quit):");
    let stdin = io::stdin();
    loop {
        print!("? ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        match session.ask(question).await {
            Ok(answer) => println!("\n{}\n", answer),
            Err(Error::NoIndex) => println!("⚠️  Please process the PDF documents first."),
            Err(e) => eprintln!("❌ {}", e),
        }
    }

    Ok(())
}
