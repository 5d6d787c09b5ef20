use pbx_refgen::{
    ReferenceHasher, DEFAULT_REFERENCE_BYTES, MAX_REFERENCE_BYTES, MIN_REFERENCE_BYTES,
};
use pbx_types::Reference;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::object::PBXObject;
use crate::store::ObjectStore;
use crate::traits::ReferenceGenerator;

/// Attempts tried for one `(isa, context)` before generation fails.
pub const MAX_ATTEMPTS: usize = 1024;

/// Hash-based [`ReferenceGenerator`].
///
/// Hashes `(isa, context, attempt)` and tries attempts upward until the
/// candidate is free in the store, giving up after [`MAX_ATTEMPTS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashReferenceGenerator {
    bytes: usize,
    uppercase: bool,
}

impl HashReferenceGenerator {
    /// `bytes` is clamped to `MIN_REFERENCE_BYTES..=MAX_REFERENCE_BYTES`.
    pub fn new(bytes: usize, uppercase: bool) -> Self {
        Self {
            bytes: bytes.clamp(MIN_REFERENCE_BYTES, MAX_REFERENCE_BYTES),
            uppercase,
        }
    }

    /// Effective width in bytes after clamping.
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Default for HashReferenceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_BYTES, true)
    }
}

impl ReferenceGenerator for HashReferenceGenerator {
    fn generate(
        &self,
        object: &PBXObject,
        context: &str,
        store: &ObjectStore,
    ) -> StoreResult<Reference> {
        let hasher = ReferenceHasher::new(object.isa())
            .with_bytes(self.bytes)
            .with_uppercase(self.uppercase);
        let free = hasher
            .candidates(context)
            .take(MAX_ATTEMPTS)
            .enumerate()
            .find(|(_, candidate)| !store.contains(candidate));
        match free {
            Some((attempt, candidate)) => {
                if attempt > 0 {
                    debug!(reference = %candidate, attempt, "reference collision resolved");
                }
                Ok(candidate)
            }
            None => {
                warn!(isa = object.isa(), context, attempts = MAX_ATTEMPTS, "no free reference");
                Err(StoreError::ReferencesExhausted {
                    isa: object.isa(),
                    context: context.to_string(),
                    attempts: MAX_ATTEMPTS,
                })
            }
        }
    }
}
