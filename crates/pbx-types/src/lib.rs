//! Foundation types for the project object graph.
//!
//! Every record in a project description is named by an opaque
//! [`Reference`]. This crate holds that identifier plus the small value
//! types shared by records: the [`SourceTree`] a path is resolved against
//! and the [`FileType`] tag assigned to file references.
//!
//! Every other `pbx-*` crate depends on `pbx-types`.

pub mod error;
pub mod file_type;
pub mod reference;
pub mod source_tree;

pub use error::TypeError;
pub use file_type::FileType;
pub use reference::Reference;
pub use source_tree::SourceTree;
