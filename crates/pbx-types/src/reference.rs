use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identifier naming exactly one record in an object store.
///
/// A `Reference` is an immutable string token. Two references are equal iff
/// they name the same object. References are never interpreted: the store
/// only compares them, and generators only promise they are unique.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reference(String);

impl Reference {
    /// Create a reference from its textual form.
    ///
    /// The token must be non-empty and free of whitespace, since references
    /// are embedded verbatim in project files.
    pub fn new(token: impl Into<String>) -> Result<Self, TypeError> {
        let token = token.into();
        if token.is_empty() {
            return Err(TypeError::EmptyReference);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidReference {
                reference: token,
                reason: "contains whitespace".into(),
            });
        }
        Ok(Self(token))
    }

    /// Hex-encode the first `len` bytes of a 32-byte digest.
    ///
    /// `len` is clamped to `1..=32`, so the result is always a valid token.
    pub fn from_digest(digest: &[u8; 32], len: usize, uppercase: bool) -> Self {
        let len = len.clamp(1, digest.len());
        let token = if uppercase {
            hex::encode_upper(&digest[..len])
        } else {
            hex::encode(&digest[..len])
        };
        Self(token)
    }

    /// The textual token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 8 characters) for log output.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(idx, _)| idx)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference({})", self.0)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Reference {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Reference {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Reference> for String {
    fn from(reference: Reference) -> Self {
        reference.0
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
