//! Bytes returned by a single fetch.

/// A contiguous run of bytes read from the bound file.
///
/// May be shorter than requested when the window runs past end-of-file,
/// and empty when the offset is at or beyond it. Consumed once by the
/// render pass that requested it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteChunk {
    offset: u64,
    bytes: Vec<u8>,
}

impl ByteChunk {
    /// Create a chunk that starts at `offset` in the file.
    pub fn new(offset: u64, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }

    /// File offset of the first byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes actually read.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the read returned nothing (offset at or past EOF).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for ByteChunk {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
