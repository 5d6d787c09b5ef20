use pbx_types::Reference;

use crate::object::ObjectKind;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The reference already names a record, possibly in another partition.
    #[error("reference {reference} already names a {existing} record")]
    DuplicateReference {
        reference: Reference,
        existing: ObjectKind,
    },

    /// Every candidate tried for this `(isa, context)` is already taken.
    #[error("no free reference for {isa} {context:?} after {attempts} attempts")]
    ReferencesExhausted {
        isa: &'static str,
        context: String,
        attempts: usize,
    },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
