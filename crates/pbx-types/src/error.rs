use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("reference must not be empty")]
    EmptyReference,

    #[error("invalid reference {reference:?}: {reason}")]
    InvalidReference { reference: String, reason: String },
}
