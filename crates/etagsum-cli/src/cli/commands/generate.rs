//! Generation mode: print `<etag> <chunk size> <target>` per file.

use anyhow::Result;
use etagsum_core::config::EtagConfig;
use etagsum_core::{plan_groups, run_groups, FsSource};
use std::io::{self, Write};

use crate::cli::PROGRAM;

/// Digest every `--size` group. Returns `false` if any file could not be read.
pub fn run_generate(cfg: &EtagConfig, occurrences: &[Vec<String>]) -> Result<bool> {
    // Sizes are validated up front: a bad one aborts before any output.
    let groups = plan_groups(occurrences)?;
    tracing::info!(groups = groups.len(), "generate");

    let source = FsSource::new(cfg.read_buffer_bytes);
    let mut out = io::BufWriter::new(io::stdout().lock());
    let mut err = io::stderr().lock();
    let ok = run_groups(&source, &groups, PROGRAM, &mut out, &mut err)?;
    out.flush()?;
    Ok(ok)
}
