use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    /// The path does not denote an existing regular file.
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The path has no UTF-8 form, so it cannot be stored in the graph.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Reference generation or insertion failed: the generator ran out of
    /// candidates or handed out a reference that is already taken.
    #[error("store error: {0}")]
    Store(#[from] pbx_store::StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProjectResult<T> = Result<T, ProjectError>;
