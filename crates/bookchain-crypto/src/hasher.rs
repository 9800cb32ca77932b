use bookchain_types::{BookId, Digest};
use md5::Md5;
use sha2::{Digest as _, Sha256};

/// Incremental SHA-256 hasher producing [`Digest`]s.
///
/// Parts are concatenated with no separators or length prefixes; callers that
/// need unambiguous framing must encode it into the parts themselves.
#[derive(Clone, Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed another part into the hash.
    pub fn update(&mut self, part: impl AsRef<[u8]>) -> &mut Self {
        self.inner.update(part.as_ref());
        self
    }

    pub fn finalize(self) -> Digest {
        let out: [u8; 32] = self.inner.finalize().into();
        Digest::from_hash(out)
    }

    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> Digest {
        Self::digest_parts(&[data])
    }

    /// Hash the concatenation of `parts`.
    pub fn digest_parts(parts: &[&[u8]]) -> Digest {
        let mut hasher = Self::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize()
    }

    /// Verify that data produces the expected digest.
    pub fn verify(data: &[u8], expected: &Digest) -> bool {
        Self::hash(data) == *expected
    }
}

/// Derive a book identifier from its ISBN and publish date.
///
/// `MD5(isbn || publish_date)`. Not a security boundary; only a stable,
/// content-derived name.
pub fn book_id(isbn: &str, publish_date: &str) -> BookId {
    let mut hasher = Md5::new();
    hasher.update(isbn.as_bytes());
    hasher.update(publish_date.as_bytes());
    BookId::from_bytes(hasher.finalize().into())
}
