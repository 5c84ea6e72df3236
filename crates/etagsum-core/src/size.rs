//! Chunk-size literals: a positive integer with an optional binary suffix.
//!
//! `K`, `M`, `G` and `T` (either case) multiply by 2^10, 2^20, 2^30 and 2^40.

use crate::error::InvalidChunkSize;

/// Parse a chunk-size literal such as `8M`, `16g` or `1048576`.
///
/// Zero, negative, empty and overflowing values are rejected.
pub fn parse_chunk_size(literal: &str) -> Result<u64, InvalidChunkSize> {
    let invalid = || InvalidChunkSize {
        literal: literal.to_string(),
    };

    let (digits, shift) = match literal.as_bytes().last() {
        Some(b'k' | b'K') => (&literal[..literal.len() - 1], 10),
        Some(b'm' | b'M') => (&literal[..literal.len() - 1], 20),
        Some(b'g' | b'G') => (&literal[..literal.len() - 1], 30),
        Some(b't' | b'T') => (&literal[..literal.len() - 1], 40),
        Some(_) => (literal, 0),
        None => return Err(invalid()),
    };

    let base: u64 = digits.parse().map_err(|_| invalid())?;
    if base == 0 {
        return Err(invalid());
    }
    base.checked_mul(1u64 << shift).ok_or_else(invalid)
}
