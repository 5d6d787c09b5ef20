//! Editing session for project description graphs.
//!
//! [`Project`] owns an [`ObjectStore`](pbx_store::ObjectStore) plus the
//! collaborators that mutations need (filesystem, file-type classifier,
//! reference generator) and exposes the idempotent edit operations:
//!
//! - [`Project::add_group_path`] -- walk or create nested groups
//! - [`Project::add_file`] -- register a file on disk
//! - [`Project::add_file_to_group`] -- link a file element into a group
//! - [`Project::add_build_file`] -- attach a file to a target's sources phase
//!
//! Read-only queries live on the store itself; reach them through
//! [`Project::store`].

pub mod config;
pub mod error;
mod files;
mod groups;
pub mod project;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ProjectConfig;
pub use error::{ProjectError, ProjectResult};
pub use project::{Project, DEFAULT_CONFIGURATIONS};

// Re-export key types
pub use pbx_store::{
    BuildPhaseKind, FileElement, ListOwner, ObjectStore, PBXBuildFile, PBXFileReference,
    PBXGroup, PBXTarget, TargetKind,
};
pub use pbx_types::Reference;
