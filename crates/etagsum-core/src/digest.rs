//! Streaming chunk-then-combine MD5, the digest behind multipart upload Etags.
//!
//! Input is cut into `chunk_size` pieces. Each piece is hashed on its own and
//! the piece digests are hashed again, in order, to form the final value. A
//! stream that never fills one chunk yields the plain MD5 of its bytes, which
//! is what object stores report for single-part uploads.

use md5::{Digest, Md5};
use std::fmt;

/// Length of an MD5 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Final digest of a chunked stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Etag {
    pub digest: [u8; DIGEST_LEN],
    /// Number of chunks combined; 0 when the stream never completed a chunk.
    pub chunk_count: u64,
}

impl Etag {
    /// Lowercase hex of the digest, without the chunk-count suffix.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

impl fmt::Display for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chunk_count > 0 {
            write!(f, "{}-{}", self.digest_hex(), self.chunk_count)
        } else {
            f.write_str(&self.digest_hex())
        }
    }
}

/// Incremental chunked hasher. Feed bytes with [`update`](Self::update) and
/// consume it with [`finalize`](Self::finalize); it is single-use.
#[derive(Clone)]
pub struct ChunkedDigest {
    chunk_size: u64,
    chunk_remaining: u64,
    current_chunk: Md5,
    combined: Md5,
    full_chunks: u64,
}

impl ChunkedDigest {
    /// # Panics
    ///
    /// If `chunk_size` is zero.
    pub fn new(chunk_size: u64) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            chunk_size,
            chunk_remaining: chunk_size,
            current_chunk: Md5::new(),
            combined: Md5::new(),
            full_chunks: 0,
        }
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Chunks completed so far.
    pub fn full_chunks(&self) -> u64 {
        self.full_chunks
    }

    /// Absorb the next bytes of the stream. A single call may complete any
    /// number of chunks.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let take = usize::try_from(self.chunk_remaining)
                .map_or(data.len(), |remaining| remaining.min(data.len()));
            let (head, tail) = data.split_at(take);
            self.current_chunk.update(head);
            self.chunk_remaining -= take as u64;
            data = tail;

            if self.chunk_remaining == 0 {
                let chunk_digest = self.current_chunk.finalize_reset();
                self.combined.update(chunk_digest);
                self.chunk_remaining = self.chunk_size;
                self.full_chunks += 1;
            }
        }
    }

    pub fn finalize(self) -> Etag {
        if self.full_chunks == 0 {
            return Etag {
                digest: self.current_chunk.finalize().into(),
                chunk_count: 0,
            };
        }

        if self.chunk_remaining == self.chunk_size {
            return Etag {
                digest: self.combined.finalize().into(),
                chunk_count: self.full_chunks,
            };
        }

        let mut combined = self.combined;
        combined.update(self.current_chunk.finalize());
        Etag {
            digest: combined.finalize().into(),
            chunk_count: self.full_chunks + 1,
        }
    }
}

impl fmt::Debug for ChunkedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedDigest")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_remaining", &self.chunk_remaining)
            .field("full_chunks", &self.full_chunks)
            .finish_non_exhaustive()
    }
}
