//! Verification mode: re-derive listed Etags and compare.
//!
//! Each listing line is parsed, its target digested under the listed chunk
//! size, and the formatted result compared byte-for-byte with the listed
//! digest. Outcomes fold into a [`VerificationTally`] shared by every listing
//! source of the run.

mod tally;

pub use tally::VerificationTally;

use std::io::{self, BufRead, BufReader, Write};

use crate::codec::{self, parse_line};
use crate::error::{MalformedLine, Unreadable};
use crate::generate::generate;
use crate::source::{StreamSource, STDIN_TARGET};

/// Output and tolerance switches for verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Skip listed targets that cannot be read, without counting them.
    pub ignore_missing: bool,
    /// Suppress `OK` lines.
    pub quiet: bool,
    /// Suppress all per-target and summary output; only the exit status speaks.
    pub status: bool,
    /// Warn about each improperly formatted line. Warnings number lines
    /// from 1, the way editors and `grep -n` do.
    pub warn: bool,
}

/// Classification of one listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Malformed(MalformedLine),
    Matched { target: String },
    Mismatch {
        target: String,
        expected: String,
        actual: String,
    },
    Unreadable(Unreadable),
}

/// Parse one line, digest its target and compare.
pub fn check_line<S>(source: &S, line: &str) -> LineOutcome
where
    S: StreamSource + ?Sized,
{
    let parsed = match parse_line(line) {
        Ok(parsed) => parsed,
        Err(e) => return LineOutcome::Malformed(e),
    };
    match generate(source, parsed.chunk_size, &parsed.target) {
        Err(e) => LineOutcome::Unreadable(e),
        Ok(record) => {
            let actual = codec::format(&record);
            if actual == parsed.digest {
                LineOutcome::Matched {
                    target: parsed.target,
                }
            } else {
                LineOutcome::Mismatch {
                    target: parsed.target,
                    expected: parsed.digest,
                    actual,
                }
            }
        }
    }
}

/// Drives verification over listing sources, writing results to `out` and
/// diagnostics to `err`.
pub struct Verifier<'a, S: ?Sized, O, E> {
    source: &'a S,
    program: &'a str,
    options: CheckOptions,
    out: O,
    err: E,
}

impl<'a, S, O, E> Verifier<'a, S, O, E>
where
    S: StreamSource + ?Sized,
    O: Write,
    E: Write,
{
    pub fn new(source: &'a S, program: &'a str, options: CheckOptions, out: O, err: E) -> Self {
        Self {
            source,
            program,
            options,
            out,
            err,
        }
    }

    /// Check every listing in order; an empty list means standard input.
    pub fn check_all<T: AsRef<str>>(
        &mut self,
        listings: &[T],
        tally: &mut VerificationTally,
    ) -> io::Result<()> {
        if listings.is_empty() {
            return self.check_source(STDIN_TARGET, tally);
        }
        for listing in listings {
            self.check_source(listing.as_ref(), tally)?;
        }
        Ok(())
    }

    /// Check one listing source. A listing that cannot be opened is reported
    /// and skipped without touching the tally.
    pub fn check_source(&mut self, listing: &str, tally: &mut VerificationTally) -> io::Result<()> {
        let source: &'a S = self.source;
        let reader = match source.open(listing) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::debug!(listing, "listing unreadable: {}", e.reason);
                writeln!(self.err, "{}: {e}", self.program)?;
                return Ok(());
            }
        };
        tracing::debug!(listing, "checking listing");

        for (index, line) in BufReader::new(reader).split(b'\n').enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    let e = Unreadable::from_io(listing, &e);
                    tracing::debug!(listing, "listing read failed: {}", e.reason);
                    writeln!(self.err, "{}: {e}", self.program)?;
                    break;
                }
            };
            let outcome = match std::str::from_utf8(&line) {
                Ok(text) => check_line(source, text),
                Err(_) => LineOutcome::Malformed(MalformedLine::NotUtf8),
            };
            self.record(listing, index, outcome, tally)?;
        }

        if !self.options.status {
            for summary in tally.summary_lines(self.program) {
                writeln!(self.err, "{summary}")?;
            }
        }
        Ok(())
    }

    fn record(
        &mut self,
        listing: &str,
        index: usize,
        outcome: LineOutcome,
        tally: &mut VerificationTally,
    ) -> io::Result<()> {
        let opts = self.options;
        match outcome {
            LineOutcome::Malformed(reason) => {
                tally.line_errors += 1;
                tracing::debug!(listing, line = index + 1, %reason, "malformed line");
                if opts.warn && !opts.status {
                    writeln!(
                        self.err,
                        "{}: {listing}: {}: improperly formatted checksum line",
                        self.program,
                        index + 1
                    )?;
                }
            }
            LineOutcome::Matched { target } => {
                tracing::debug!(target_name = %target, "ok");
                if !opts.quiet && !opts.status {
                    writeln!(self.out, "{target}: OK")?;
                }
            }
            LineOutcome::Mismatch {
                target,
                expected,
                actual,
            } => {
                tally.checksum_errors += 1;
                tracing::debug!(target_name = %target, %expected, %actual, "checksum mismatch");
                if !opts.status {
                    writeln!(self.out, "{target}: FAILED")?;
                }
            }
            LineOutcome::Unreadable(e) => {
                if opts.ignore_missing {
                    tracing::debug!(target_name = %e.target, "skipping unreadable target");
                    return Ok(());
                }
                tally.file_errors += 1;
                if !opts.status {
                    writeln!(self.err, "{}: {e}", self.program)?;
                    writeln!(self.out, "{}: FAILED", e.target)?;
                }
            }
        }
        Ok(())
    }

    /// Hand back the output sinks, e.g. to flush or inspect them.
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}
