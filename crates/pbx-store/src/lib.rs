//! Partitioned object store for project description graphs.
//!
//! A project description is a graph of typed records (targets, groups, file
//! references, build files, build phases, build configurations) cross-linked
//! by opaque [`Reference`](pbx_types::Reference)s. This crate holds those
//! records and answers every read-only question the editing layer asks.
//!
//! # Records
//!
//! - [`PBXTarget`] -- native, legacy or aggregate target ([`TargetVariant`])
//! - [`PBXGroup`] / [`PBXFileReference`] -- the logical file tree
//! - [`PBXBuildFile`] -- join record between a file and a build phase
//! - [`PBXBuildPhase`] -- one of seven [`BuildPhaseKind`]s
//! - [`XCBuildConfiguration`] / [`XCConfigurationList`] / [`PBXProject`]
//!
//! # Design Rules
//!
//! 1. A reference appears in at most one partition.
//! 2. Partitions iterate in insertion order; queries that say "first" mean
//!    first in that order.
//! 3. Records are never deleted, so stored edges never start dangling.
//! 4. Missing records are `None` or empty results, never errors.
//!
//! # Collaborators
//!
//! The traits in [`traits`] are the seams to the outside world; default
//! implementations are [`OsFileSystem`], [`ExtensionClassifier`] and
//! [`HashReferenceGenerator`].

pub mod classify;
pub mod error;
pub mod file_types;
pub mod generator;
pub mod object;
pub mod query;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file_types::{ExtensionClassifier, OsFileSystem};
pub use generator::{HashReferenceGenerator, MAX_ATTEMPTS};
pub use object::{
    BuildPhaseKind, FileElement, ObjectKind, PBXBuildFile, PBXBuildPhase, PBXFileReference,
    PBXGroup, PBXObject, PBXProject, PBXTarget, PhaseDetail, TargetKind, TargetVariant,
    XCBuildConfiguration, XCConfigurationList,
};
pub use query::ListOwner;
pub use store::{ObjectStore, Partition, StoreSnapshot};
pub use traits::{FileSystem, FileTypeClassifier, ReferenceGenerator};

pub use pbx_refgen::{MAX_REFERENCE_BYTES, MIN_REFERENCE_BYTES};
