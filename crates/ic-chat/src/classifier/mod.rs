//! LLM intent classification.
//!
//! Sends the operator's question to a language model under a fixed prompt
//! contract and returns the model's one-line reply, trimmed and lowercased.
//! Decoding that reply into an `Intent` is `ic_query::parse_reply`'s job.
//!
//! Two providers:
//! - **Gemini** (`generateContent` REST API).
//! - **Ollama** (`/api/chat` on a local or LAN host).

pub mod gemini;
pub mod ollama;

use async_trait::async_trait;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::ClassifyResult;

pub use gemini::GeminiClassifier;
pub use ollama::OllamaClassifier;

/// Prompt contract. Patterns and their order mirror `ic_query::parser`.
pub const SYSTEM_PROMPT: &str = r#"You translate questions about invoices into a single command for an accounts payable and receivable assistant.

Respond with EXACTLY ONE lowercase line and nothing else (no markdown, no explanation), using the first pattern below that fits:

1. field:<field_name> invoice:<invoice_id>
   A single attribute of one invoice. Field names: invoice_id, status, approver, type, vendor, customer, amount, last_updated.
   Example: "Who is the vendor on INV1001?" -> field:vendor invoice:inv1001

2. invoice:<invoice_id>
   All details of one invoice. Invoice IDs look like inv followed by digits.
   Example: "What is the status of INV1002?" -> invoice:inv1002

3. status:<status>
   Invoices with a status: pending, approved or rejected.
   Example: "Show me all pending invoices" -> status:pending

4. amount<operator><number>
   Invoices compared by amount. Operator is one of > < =. Number is a whole number without separators or currency.
   Example: "Which invoices are over 5000?" -> amount>5000

5. vendor:<name> or customer:<name>
   Invoices for one vendor or one customer.
   Example: "Which invoices are from Acme Corp?" -> vendor:acme corp

6. date<operator><yyyy-mm-dd>
   Invoices by last updated date. Operator is one of > < =.
   Example: "Invoices updated after January 15 2023" -> date>2023-01-15

If none of the patterns fit, respond with exactly: unrecognized"#;

/// Trait for language model backends that classify a question.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify `question`, returning the normalized one-line reply.
    async fn classify(&self, question: &str) -> ClassifyResult<String>;

    /// Provider name (for logging).
    fn provider_name(&self) -> &str;
}

/// Build the classifier selected by `config`.
pub fn from_config(config: &LlmConfig) -> ClassifyResult<Box<dyn Classifier>> {
    Ok(match config.provider {
        LlmProvider::Gemini => Box::new(GeminiClassifier::new(config)?),
        LlmProvider::Ollama => Box::new(OllamaClassifier::new(config)?),
    })
}

/// Trim, drop stray code fences or backticks, and lowercase a model reply.
pub fn normalize_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    let unfenced = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    unfenced.trim().trim_matches('`').trim().to_lowercase()
}
