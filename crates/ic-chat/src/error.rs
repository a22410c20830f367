//! Chat client error types.

use thiserror::Error;

/// Errors from the LLM classification call.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("language model unreachable: {0}")]
    Transport(String),

    #[error("language model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid language model response: {0}")]
    Decode(String),

    #[error("language model returned an empty reply")]
    EmptyReply,

    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),
}

/// Convenience alias for classifier results.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
