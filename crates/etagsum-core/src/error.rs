//! Error kinds shared by the generation and verification pipelines.

use std::io;

/// A chunk-size literal that does not denote a positive byte count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid chunk size: {literal:?}")]
pub struct InvalidChunkSize {
    pub literal: String,
}

/// A target (or listing source) that could not be opened or read.
///
/// `reason` is the OS error text without Rust's `(os error N)` suffix, so the
/// rendered form is `<target>: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{target}: {reason}")]
pub struct Unreadable {
    pub target: String,
    pub reason: String,
}

impl Unreadable {
    pub fn new(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn from_io(target: impl Into<String>, err: &io::Error) -> Self {
        Self::new(target, describe_io_error(err))
    }
}

/// A checksum-listing line that does not follow `<digest> <chunk size> <target>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedLine {
    #[error("expected three space-separated fields")]
    MissingFields,
    #[error("empty chunk size field")]
    EmptyChunkSize,
    #[error(transparent)]
    ChunkSize(#[from] InvalidChunkSize),
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

/// Render an I/O error the way coreutils do: `No such file or directory`
/// rather than `No such file or directory (os error 2)`.
pub fn describe_io_error(err: &io::Error) -> String {
    let text = err.to_string();
    match text.rfind(" (os error ") {
        Some(idx) if text.ends_with(')') => text[..idx].to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_strips_os_error_suffix() {
        let err = io::Error::from_raw_os_error(2);
        let text = describe_io_error(&err);
        assert!(!text.contains("os error"), "got {text:?}");
        assert!(!text.is_empty());
    }

    #[test]
    fn describe_keeps_custom_messages() {
        let err = io::Error::new(io::ErrorKind::Other, "standard input has already been consumed");
        assert_eq!(
            describe_io_error(&err),
            "standard input has already been consumed"
        );
    }

    #[test]
    fn unreadable_display() {
        let e = Unreadable::new("a.bin", "Permission denied");
        assert_eq!(e.to_string(), "a.bin: Permission denied");
    }
}
