use std::path::Path;

use pbx_types::{FileType, Reference};

use crate::error::StoreResult;
use crate::object::PBXObject;
use crate::store::ObjectStore;

/// Filesystem access needed by mutation operations.
pub trait FileSystem: Send + Sync {
    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// File-type classification by path.
pub trait FileTypeClassifier: Send + Sync {
    fn classify(&self, path: &Path) -> FileType;
}

/// Source of fresh references for new records.
///
/// All implementations must satisfy these invariants:
/// - The result is unique against every reference currently in `store`.
/// - Identical `(object.isa(), context)` input against a store in the same
///   state yields the same reference.
/// - A reference, once assigned, is never regenerated; callers only ask for
///   references for records they are about to insert.
/// - Generation returns in bounded time, failing with a [`StoreError`](crate::StoreError)
///   rather than searching forever.
pub trait ReferenceGenerator: Send + Sync {
    fn generate(
        &self,
        object: &PBXObject,
        context: &str,
        store: &ObjectStore,
    ) -> StoreResult<Reference>;
}
