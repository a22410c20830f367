//! Intent parsing and query evaluation for Invoice Chat.
//!
//! Decodes the classifier's constrained single-line reply into an
//! [`Intent`](ic_protocol::Intent), then evaluates it against invoices served
//! by an [`InvoiceSource`]: single-record lookups hit the source by ID,
//! filters run as pure functions over the pending collection.

pub mod error;
pub mod evaluator;
pub mod filter;
pub mod mock;
pub mod parser;
pub mod source;

pub use error::{ParseError, ParseResult, SourceError, SourceResult};
pub use evaluator::{QueryOutcome, evaluate};
pub use filter::{apply_filter, filter_records, matches_record};
pub use mock::MockInvoiceSource;
pub use parser::parse_reply;
pub use source::InvoiceSource;
