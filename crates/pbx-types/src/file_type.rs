use std::fmt;

use serde::{Deserialize, Serialize};

/// Uniform type tag of a file reference (e.g. `sourcecode.swift`).
///
/// Stored on file references as `lastKnownFileType` or `explicitFileType`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileType(String);

impl FileType {
    /// Fallback tag for files whose type cannot be determined.
    pub const UNKNOWN: &'static str = "file";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The generic `file` tag.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the generic `file` tag.
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Returns `true` for tags the compiler consumes (`sourcecode.*`),
    /// excluding headers.
    pub fn is_compilable(&self) -> bool {
        self.0.starts_with("sourcecode.") && !self.0.ends_with(".h")
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
