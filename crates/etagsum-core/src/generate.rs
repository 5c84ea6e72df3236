//! Generation mode: digest targets under explicit chunk sizes.

use std::io::{self, Write};

use crate::codec::{self, ChecksumRecord};
use crate::digest::ChunkedDigest;
use crate::error::{InvalidChunkSize, Unreadable};
use crate::size::parse_chunk_size;
use crate::source::{StreamSource, STDIN_TARGET};

/// Digest one target. Open failures return before any hashing starts.
pub fn generate<S>(source: &S, chunk_size: u64, target: &str) -> Result<ChecksumRecord, Unreadable>
where
    S: StreamSource + ?Sized,
{
    let mut stream = source.buffers(target)?;
    let mut digest = ChunkedDigest::new(chunk_size);
    let mut total: u64 = 0;
    while let Some(buf) = stream.next_buffer()? {
        total += buf.len() as u64;
        digest.update(buf);
    }
    let etag = digest.finalize();
    tracing::debug!(target_name = target, chunk_size, bytes = total, %etag, "digested");
    Ok(ChecksumRecord::new(etag, chunk_size, target))
}

/// Targets to digest under one chunk size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGroup {
    pub chunk_size: u64,
    pub targets: Vec<String>,
}

/// Build groups from repeated `SIZE [FILE]...` occurrences.
///
/// Every size is parsed before anything is read, so a bad literal aborts the
/// run without partial output. Only the last group falls back to standard
/// input when it lists no files; earlier empty groups produce nothing.
pub fn plan_groups<T: AsRef<str>>(occurrences: &[Vec<T>]) -> Result<Vec<SizeGroup>, InvalidChunkSize> {
    let mut groups = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        let Some((size, targets)) = occurrence.split_first() else {
            continue;
        };
        groups.push(SizeGroup {
            chunk_size: parse_chunk_size(size.as_ref())?,
            targets: targets.iter().map(|t| t.as_ref().to_string()).collect(),
        });
    }
    if let Some(last) = groups.last_mut() {
        if last.targets.is_empty() {
            last.targets.push(STDIN_TARGET.to_string());
        }
    }
    Ok(groups)
}

/// Digest every target of every group, writing one line per target to `out`
/// and one `<program>: <target>: <reason>` line per failure to `err`.
///
/// Returns `true` when every target was digested.
pub fn run_groups<S, O, E>(
    source: &S,
    groups: &[SizeGroup],
    program: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<bool>
where
    S: StreamSource + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let mut all_ok = true;
    for group in groups {
        for target in &group.targets {
            match generate(source, group.chunk_size, target) {
                Ok(record) => writeln!(out, "{}", codec::format_line(&record))?,
                Err(e) => {
                    tracing::debug!(target_name = %target, "unreadable: {}", e.reason);
                    writeln!(err, "{program}: {e}")?;
                    all_ok = false;
                }
            }
        }
    }
    Ok(all_ok)
}
