use pbx_types::Reference;

/// Width of generated references in bytes (24 hex characters).
pub const DEFAULT_REFERENCE_BYTES: usize = 12;

/// Narrowest width callers should configure.
pub const MIN_REFERENCE_BYTES: usize = 4;

/// Full BLAKE3 digest width.
pub const MAX_REFERENCE_BYTES: usize = 32;

/// Domain-separated BLAKE3 reference hasher.
///
/// The domain tag (an `isa` name such as `"PBXGroup"`) is prepended to every
/// hash computation, so a group and a file reference built from the same
/// context string hash to different references.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceHasher {
    domain: &'static str,
    bytes: usize,
    uppercase: bool,
}

impl ReferenceHasher {
    /// Hasher with the default width and uppercase hex output.
    pub const fn new(domain: &'static str) -> Self {
        Self {
            domain,
            bytes: DEFAULT_REFERENCE_BYTES,
            uppercase: true,
        }
    }

    /// Override the digest width in bytes (clamped to `1..=32` on output).
    pub const fn with_bytes(mut self, bytes: usize) -> Self {
        self.bytes = bytes;
        self
    }

    /// Choose lowercase or uppercase hex output.
    pub const fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Hash a context string at a given attempt.
    ///
    /// Attempt `0` is the first candidate; callers bump the attempt to search
    /// for a free reference when the candidate is already taken.
    pub fn hash(&self, context: &str, attempt: u32) -> Reference {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(context.as_bytes());
        hasher.update(b":");
        hasher.update(&attempt.to_le_bytes());
        Reference::from_digest(hasher.finalize().as_bytes(), self.bytes, self.uppercase)
    }

    /// Iterate over candidate references for a context, attempt 0 upward.
    pub fn candidates<'a>(&'a self, context: &'a str) -> impl Iterator<Item = Reference> + 'a {
        (0..=u32::MAX).map(move |attempt| self.hash(context, attempt))
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }

    /// Configured digest width in bytes.
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}
