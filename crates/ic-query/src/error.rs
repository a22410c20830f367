//! Query layer error types.

use thiserror::Error;

/// A reply that entered a parser branch but could not be decoded.
///
/// Distinct from `Intent::Unrecognized`: the classifier clearly aimed at a
/// filter, but its operator or value was unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("could not process the {clause} condition in \"{reply}\"")]
    Unprocessable { clause: &'static str, reply: String },
}

impl ParseError {
    pub fn unprocessable(clause: &'static str, reply: &str) -> Self {
        Self::Unprocessable {
            clause,
            reply: reply.to_string(),
        }
    }

    pub fn clause(&self) -> &'static str {
        match self {
            Self::Unprocessable { clause, .. } => clause,
        }
    }
}

/// Convenience alias for parser results.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors reported by an invoice source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invoice service unreachable: {0}")]
    Transport(String),

    #[error("invoice service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid invoice payload: {0}")]
    Decode(String),
}

/// Convenience alias for invoice source results.
pub type SourceResult<T> = Result<T, SourceError>;
