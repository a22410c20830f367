//! Invoice Chat — terminal chat client for invoice questions.
//!
//! Reads one question per line from stdin, classifies it with the configured
//! LLM, queries the invoice service and prints a markdown reply.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use ic_chat::config::ChatConfig;
use ic_chat::{ChatSession, HttpInvoiceService, classifier, render};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean transcript.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ic-chat starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args().nth(1);
    let config = ChatConfig::load(config_path.as_deref())?;
    tracing::info!(
        service = %config.invoice_service.base_url,
        provider = config.llm.provider.as_str(),
        model = config.llm.model(),
        "config loaded"
    );

    // ── Wire classifier + invoice service ───────────────────────
    let classifier = classifier::from_config(&config.llm)?;
    let service = HttpInvoiceService::new(&config.invoice_service)?;
    let session = ChatSession::new(classifier, Box::new(service));

    println!("{}\n", render::welcome());

    // ── REPL ────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = session.handle(question).await;
        println!("\n{}\n", reply.to_markdown());
    }

    tracing::info!("ic-chat exiting");
    Ok(())
}
