//! Presentation — turns query outcomes into markdown blocks for the terminal.

use ic_protocol::{Comparison, Intent, InvoiceRecord, StatusKind};
use ic_query::{ParseError, QueryOutcome, SourceError};

use crate::error::ClassifyError;

/// Severity of a banner line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// One piece of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Banner { level: Level, text: String },
    Markdown(String),
}

/// Everything printed in answer to one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub blocks: Vec<Block>,
}

impl Reply {
    fn banner(level: Level, text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::Banner {
                level,
                text: text.into(),
            }],
        }
    }

    fn push_markdown(&mut self, markdown: impl Into<String>) {
        self.blocks.push(Block::Markdown(markdown.into()));
    }

    /// Level of the first banner, if any.
    pub fn level(&self) -> Option<Level> {
        self.blocks.iter().find_map(|block| match block {
            Block::Banner { level, .. } => Some(*level),
            Block::Markdown(_) => None,
        })
    }

    /// Render all blocks as one markdown document.
    pub fn to_markdown(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Banner { level, text } => format!("> **{}:** {text}", level.label()),
                Block::Markdown(md) => md.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Greeting shown once when the session starts.
pub fn welcome() -> String {
    [
        "# 💬 Invoice Chatbot",
        "A smart assistant for your accounts payable and receivable queries.",
        "> **Info:** Examples: 'What is the status of INV1002?', 'Show me all pending invoices', \
         'Which invoices are from vendor: Acme Corp?', 'Which invoices have an amount > 5000?'",
        "Type `exit` to quit.",
    ]
    .join("\n\n")
}

pub fn outcome(outcome: &QueryOutcome) -> Reply {
    match outcome {
        QueryOutcome::Field {
            invoice_id,
            field,
            value,
        } => Reply::banner(
            Level::Success,
            format!(
                "The **{}** for invoice **{invoice_id}** is: `{value}`",
                title_case(field)
            ),
        ),
        QueryOutcome::FieldNotFound { invoice_id, field } => Reply::banner(
            Level::Warning,
            format!("Field '{field}' not found for invoice {invoice_id}."),
        ),
        QueryOutcome::Invoice(record) => Reply {
            blocks: vec![Block::Markdown(invoice_card(record))],
        },
        QueryOutcome::NotFound { invoice_id } => {
            Reply::banner(Level::Error, format!("Invoice **{invoice_id}** not found."))
        }
        QueryOutcome::Matches { filter, records } => matches(filter, records),
        QueryOutcome::Unrecognized => Reply::banner(
            Level::Warning,
            "🤔 I'm sorry, I couldn't understand that query. Please try rephrasing.",
        ),
    }
}

pub fn blank_question() -> Reply {
    Reply::banner(Level::Warning, "Please enter a question about invoices.")
}

pub fn parse_error(err: &ParseError) -> Reply {
    let example = match err.clause() {
        "amount" => "Which invoices have an amount > 5000?",
        "date" => "Which invoices were updated after 2023-01-15?",
        "vendor" => "Which invoices are from vendor: Acme Corp?",
        _ => "Which invoices are for customer: Globex?",
    };
    Reply::banner(
        Level::Warning,
        format!(
            "⚠️ I couldn't process the {} condition in that query. Try something like '{example}'",
            err.clause()
        ),
    )
}

pub fn classifier_failure(err: &ClassifyError) -> Reply {
    Reply::banner(Level::Error, format!("Error querying the language model: {err}"))
}

pub fn service_failure(err: &SourceError) -> Reply {
    Reply::banner(
        Level::Error,
        format!("Error fetching invoices from the invoice service: {err}"),
    )
}

/// Detail card for a single invoice.
pub fn invoice_card(record: &InvoiceRecord) -> String {
    let icon = match record.status.kind() {
        StatusKind::Approved => "✅",
        StatusKind::Pending => "⏳",
        StatusKind::Rejected => "❌",
        StatusKind::Other => "📄",
    };

    format!(
        "### {icon} Invoice Details: {id}\n\
         - **Status:** `{status}`\n\
         - **Approver:** `{approver}`\n\
         - **Type:** `{kind}`\n\
         - **Vendor:** `{vendor}`\n\
         - **Customer:** `{customer}`\n\
         - **Amount:** `Rs. {amount}`\n\
         - **Last Updated:** `{updated}`\n\
         \n\
         ---",
        id = record.invoice_id,
        status = title_case(record.status.as_str()),
        approver = record.approver,
        kind = title_case(&record.kind),
        vendor = record.field("vendor").unwrap_or_default(),
        customer = record.field("customer").unwrap_or_default(),
        amount = record.amount,
        updated = record.last_updated,
    )
}

/// Column order of list bullets.
#[derive(Clone, Copy)]
enum Bullet {
    StatusFirst,
    AmountFirst,
    DateFirst,
}

impl Bullet {
    fn render(self, inv: &InvoiceRecord) -> String {
        match self {
            Self::StatusFirst => format!(
                "- **{}** | Status: `{}` | Amount: `Rs. {}`",
                inv.invoice_id, inv.status, inv.amount
            ),
            Self::AmountFirst => format!(
                "- **{}** | Amount: `Rs. {}` | Status: `{}`",
                inv.invoice_id, inv.amount, inv.status
            ),
            Self::DateFirst => format!(
                "- **{}** | Last Updated: `{}` | Amount: `Rs. {}`",
                inv.invoice_id, inv.last_updated, inv.amount
            ),
        }
    }
}

fn matches(filter: &Intent, records: &[InvoiceRecord]) -> Reply {
    let count = records.len();
    let (headline, bullet) = match filter {
        Intent::StatusFilter { status } => (
            format!("✅ Found **{count}** {} invoices.", title_case(status)),
            Bullet::StatusFirst,
        ),
        Intent::AmountFilter {
            operator,
            threshold,
        } => {
            let relation = match operator {
                Comparison::GreaterThan => "greater than",
                Comparison::LessThan => "less than",
                Comparison::Equal => "equal to",
            };
            (
                format!("💰 Found **{count}** invoices with amounts {relation} `Rs. {threshold}`."),
                Bullet::AmountFirst,
            )
        }
        Intent::PartyFilter { key, name } => (
            format!(
                "🔍 Found **{count}** invoices for **{} '{name}'**.",
                title_case(&key.to_string())
            ),
            Bullet::AmountFirst,
        ),
        Intent::DateFilter { operator, date } => {
            let relation = match operator {
                Comparison::GreaterThan => "after",
                Comparison::LessThan => "before",
                Comparison::Equal => "on",
            };
            (
                format!("📅 Found **{count}** invoices last updated {relation} `{date}`."),
                Bullet::DateFirst,
            )
        }
        other => (
            format!("Found **{count}** invoices for {}.", other.name()),
            Bullet::AmountFirst,
        ),
    };

    let mut reply = Reply::banner(Level::Info, headline);
    if !records.is_empty() {
        let list: Vec<String> = records.iter().map(|inv| bullet.render(inv)).collect();
        reply.push_markdown(list.join("\n"));
    }
    reply
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ic_protocol::{InvoiceStatus, PartyKey};
    use std::collections::BTreeMap;

    fn record(id: &str, status: InvoiceStatus, amount: f64) -> InvoiceRecord {
        InvoiceRecord {
            invoice_id: id.into(),
            status,
            approver: "R. Mehta".into(),
            kind: "payable".into(),
            vendor: Some("Acme Corp".into()),
            customer: None,
            amount,
            last_updated: "2023-01-20T10:00:00".into(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("approved"), "Approved");
        assert_eq!(title_case("last_updated"), "Last_Updated");
        assert_eq!(title_case("ACME corp"), "Acme Corp");
    }

    // ── Card ────────────────────────────────────────────────────

    #[test]
    fn card_shows_all_attributes() {
        let card = invoice_card(&record("INV1002", InvoiceStatus::pending(), 5000.0));
        assert!(card.starts_with("### ⏳ Invoice Details: INV1002"));
        assert!(card.contains("- **Status:** `Pending`"));
        assert!(card.contains("- **Type:** `Payable`"));
        assert!(card.contains("- **Vendor:** `Acme Corp`"));
        assert!(card.contains("- **Customer:** `N/A`"));
        assert!(card.contains("- **Amount:** `Rs. 5000`"));
        assert!(card.contains("- **Last Updated:** `2023-01-20T10:00:00`"));
        assert!(card.ends_with("---"));
    }

    #[test]
    fn card_icon_per_status() {
        let approved = invoice_card(&record("INV1", InvoiceStatus::approved(), 1.0));
        assert!(approved.starts_with("### ✅"));
        let rejected = invoice_card(&record("INV2", InvoiceStatus::rejected(), 1.0));
        assert!(rejected.starts_with("### ❌"));
        let other = invoice_card(&record("INV3", InvoiceStatus::parse("on_hold"), 1.0));
        assert!(other.starts_with("### 📄"));
    }

    // ── Outcomes ────────────────────────────────────────────────

    #[test]
    fn field_success_banner() {
        let reply = outcome(&QueryOutcome::Field {
            invoice_id: "INV1001".into(),
            field: "approver".into(),
            value: "R. Mehta".into(),
        });
        assert_eq!(reply.level(), Some(Level::Success));
        assert_eq!(
            reply.to_markdown(),
            "> **Success:** The **Approver** for invoice **INV1001** is: `R. Mehta`"
        );
    }

    #[test]
    fn not_found_is_error() {
        let reply = outcome(&QueryOutcome::NotFound {
            invoice_id: "INV9".into(),
        });
        assert_eq!(reply.level(), Some(Level::Error));
        assert!(reply.to_markdown().contains("Invoice **INV9** not found."));
    }

    #[test]
    fn field_not_found_is_warning() {
        let reply = outcome(&QueryOutcome::FieldNotFound {
            invoice_id: "INV1".into(),
            field: "due_date".into(),
        });
        assert_eq!(reply.level(), Some(Level::Warning));
        assert!(reply.to_markdown().contains("Field 'due_date' not found for invoice INV1."));
    }

    #[test]
    fn status_list() {
        let reply = outcome(&QueryOutcome::Matches {
            filter: Intent::StatusFilter {
                status: "approved".into(),
            },
            records: vec![
                record("INV1", InvoiceStatus::approved(), 3000.0),
                record("INV4", InvoiceStatus::approved(), 12500.5),
            ],
        });
        assert_eq!(reply.level(), Some(Level::Info));
        let md = reply.to_markdown();
        assert!(md.contains("✅ Found **2** Approved invoices."));
        assert!(md.contains("- **INV1** | Status: `approved` | Amount: `Rs. 3000`"));
        assert!(md.contains("- **INV4** | Status: `approved` | Amount: `Rs. 12500.5`"));
    }

    #[test]
    fn status_list_shows_status_as_sent() {
        let reply = outcome(&QueryOutcome::Matches {
            filter: Intent::StatusFilter {
                status: "approved".into(),
            },
            records: vec![record("INV7", InvoiceStatus::parse("Approved"), 10.0)],
        });
        let md = reply.to_markdown();
        assert!(md.contains("- **INV7** | Status: `Approved` | Amount: `Rs. 10`"));
    }

    #[test]
    fn empty_match_has_no_list() {
        let reply = outcome(&QueryOutcome::Matches {
            filter: Intent::AmountFilter {
                operator: Comparison::GreaterThan,
                threshold: 1_000_000,
            },
            records: vec![],
        });
        assert_eq!(reply.blocks.len(), 1);
        assert!(
            reply
                .to_markdown()
                .contains("💰 Found **0** invoices with amounts greater than `Rs. 1000000`.")
        );
    }

    #[test]
    fn party_headline() {
        let reply = outcome(&QueryOutcome::Matches {
            filter: Intent::PartyFilter {
                key: PartyKey::Vendor,
                name: "acme corp".into(),
            },
            records: vec![record("INV1", InvoiceStatus::pending(), 10.0)],
        });
        let md = reply.to_markdown();
        assert!(md.contains("🔍 Found **1** invoices for **Vendor 'acme corp'**."));
        assert!(md.contains("- **INV1** | Amount: `Rs. 10` | Status: `pending`"));
    }

    #[test]
    fn date_headline() {
        let reply = outcome(&QueryOutcome::Matches {
            filter: Intent::DateFilter {
                operator: Comparison::LessThan,
                date: chrono::NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            },
            records: vec![record("INV1", InvoiceStatus::pending(), 10.0)],
        });
        let md = reply.to_markdown();
        assert!(md.contains("📅 Found **1** invoices last updated before `2023-01-15`."));
        assert!(md.contains("Last Updated: `2023-01-20T10:00:00`"));
    }

    #[test]
    fn unrecognized_warning() {
        let reply = outcome(&QueryOutcome::Unrecognized);
        assert_eq!(reply.level(), Some(Level::Warning));
        assert!(reply.to_markdown().contains("couldn't understand"));
    }

    // ── Failures ────────────────────────────────────────────────

    #[test]
    fn parse_error_names_clause() {
        let reply = parse_error(&ParseError::unprocessable("date", "date soon"));
        assert_eq!(reply.level(), Some(Level::Warning));
        let md = reply.to_markdown();
        assert!(md.contains("couldn't process the date condition"));
        assert!(!md.contains("couldn't understand"));
    }

    #[test]
    fn upstream_failures_are_errors() {
        let reply = classifier_failure(&ClassifyError::EmptyReply);
        assert_eq!(reply.level(), Some(Level::Error));
        let reply = service_failure(&SourceError::Transport("connection refused".into()));
        assert_eq!(reply.level(), Some(Level::Error));
        assert!(reply.to_markdown().contains("connection refused"));
    }
}
