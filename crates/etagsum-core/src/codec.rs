//! Textual Etag records: `<digest>[-<count>] <chunk size> <target>`.

use crate::digest::Etag;
use crate::error::MalformedLine;
use crate::size::parse_chunk_size;

/// One digested target, ready to print or compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub digest_hex: String,
    /// 0 means the target never filled a chunk and is rendered without a suffix.
    pub chunk_count: u64,
    pub chunk_size: u64,
    pub target: String,
}

impl ChecksumRecord {
    pub fn new(etag: Etag, chunk_size: u64, target: impl Into<String>) -> Self {
        Self {
            digest_hex: etag.digest_hex(),
            chunk_count: etag.chunk_count,
            chunk_size,
            target: target.into(),
        }
    }
}

/// A listing line split into its three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Expected digest exactly as written, including any `-<count>` suffix.
    pub digest: String,
    pub chunk_size: u64,
    pub target: String,
}

/// `<digest_hex>-<chunk_count>`, or just `<digest_hex>` when no chunk completed.
pub fn format(record: &ChecksumRecord) -> String {
    if record.chunk_count > 0 {
        format!("{}-{}", record.digest_hex, record.chunk_count)
    } else {
        record.digest_hex.clone()
    }
}

pub fn format_line(record: &ChecksumRecord) -> String {
    format!("{} {} {}", format(record), record.chunk_size, record.target)
}

/// Split a listing line into digest, chunk size and target.
///
/// The target is everything after the second space, so it may itself contain
/// spaces. The digest is not validated here; a bad digest shows up as a
/// mismatch during verification.
pub fn parse_line(line: &str) -> Result<ParsedLine, MalformedLine> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.splitn(3, ' ');
    let (Some(digest), Some(size), Some(target)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(MalformedLine::MissingFields);
    };
    if size.is_empty() {
        return Err(MalformedLine::EmptyChunkSize);
    }
    let chunk_size = parse_chunk_size(size)?;

    Ok(ParsedLine {
        digest: digest.to_string(),
        chunk_size,
        target: target.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(chunk_count: u64) -> ChecksumRecord {
        ChecksumRecord {
            digest_hex: "0123456789abcdef0123456789abcdef".to_string(),
            chunk_count,
            chunk_size: 8 * 1024 * 1024,
            target: "disk image.iso".to_string(),
        }
    }

    #[test]
    fn format_without_full_chunks_has_no_suffix() {
        assert_eq!(format(&record(0)), "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn format_with_chunks_appends_count() {
        assert_eq!(format(&record(3)), "0123456789abcdef0123456789abcdef-3");
    }

    #[test]
    fn format_line_layout() {
        assert_eq!(
            format_line(&record(2)),
            "0123456789abcdef0123456789abcdef-2 8388608 disk image.iso"
        );
    }

    #[test]
    fn parse_line_round_trips_format_line() {
        let rec = record(2);
        let parsed = parse_line(&format_line(&rec)).unwrap();
        assert_eq!(parsed.digest, format(&rec));
        assert_eq!(parsed.chunk_size, rec.chunk_size);
        assert_eq!(parsed.target, rec.target);
    }

    #[test]
    fn parse_line_accepts_size_suffix_and_strips_terminators() {
        let parsed = parse_line("abc-2 8M a.bin\r\n").unwrap();
        assert_eq!(parsed.digest, "abc-2");
        assert_eq!(parsed.chunk_size, 8 << 20);
        assert_eq!(parsed.target, "a.bin");
    }

    #[test]
    fn parse_line_keeps_spaces_in_target() {
        let parsed = parse_line("abc 1K my  file ").unwrap();
        assert_eq!(parsed.target, "my  file ");
    }

    #[test]
    fn parse_line_rejects_missing_fields() {
        assert_eq!(parse_line(""), Err(MalformedLine::MissingFields));
        assert_eq!(parse_line("abc"), Err(MalformedLine::MissingFields));
        assert_eq!(parse_line("abc 8M"), Err(MalformedLine::MissingFields));
    }

    #[test]
    fn parse_line_rejects_empty_size() {
        assert_eq!(parse_line("abc  a.bin"), Err(MalformedLine::EmptyChunkSize));
    }

    #[test]
    fn parse_line_rejects_bad_size() {
        assert!(matches!(
            parse_line("abc 0 a.bin"),
            Err(MalformedLine::ChunkSize(_))
        ));
        assert!(matches!(
            parse_line("abc eight a.bin"),
            Err(MalformedLine::ChunkSize(_))
        ));
    }

    #[test]
    fn parse_line_does_not_validate_digest() {
        let parsed = parse_line("not-a-digest 4 x").unwrap();
        assert_eq!(parsed.digest, "not-a-digest");
    }
}
