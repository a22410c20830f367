//! Invoice Chat — library crate for the terminal chat client.
//!
//! Re-exports all modules so external crates (e.g. `ic-e2e-tests`) can
//! drive a `ChatSession` against mock servers.

pub mod classifier;
pub mod config;
pub mod error;
pub mod render;
pub mod service;
pub mod session;

pub use classifier::Classifier;
pub use config::ChatConfig;
pub use error::{ClassifyError, ClassifyResult, ConfigError};
pub use render::{Block, Level, Reply};
pub use service::HttpInvoiceService;
pub use session::ChatSession;
