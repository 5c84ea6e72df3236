//! Verification mode: check listed Etags against the files they name.

use anyhow::Result;
use etagsum_core::config::EtagConfig;
use etagsum_core::{CheckOptions, FsSource, VerificationTally, Verifier};
use std::io::{self, Write};

use crate::cli::PROGRAM;

/// Check every listing (standard input if none). Returns `false` if any
/// line was malformed, any file unreadable, or any checksum mismatched.
pub fn run_check(cfg: &EtagConfig, listings: &[String], options: CheckOptions) -> Result<bool> {
    let options = CheckOptions {
        ignore_missing: options.ignore_missing || cfg.check.ignore_missing,
        warn: options.warn || cfg.check.warn,
        ..options
    };
    tracing::info!(listings = listings.len(), ?options, "check");

    let source = FsSource::new(cfg.read_buffer_bytes);
    let mut tally = VerificationTally::default();
    let mut verifier = Verifier::new(
        &source,
        PROGRAM,
        options,
        io::stdout().lock(),
        io::stderr().lock(),
    );
    verifier.check_all(listings, &mut tally)?;
    let (mut out, _) = verifier.into_writers();
    out.flush()?;

    tracing::info!(?tally, "check finished");
    Ok(tally.is_success())
}
