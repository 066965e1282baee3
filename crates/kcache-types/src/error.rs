use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("invalid selector {input:?}: {reason}")]
    InvalidSelector { input: String, reason: String },
}
