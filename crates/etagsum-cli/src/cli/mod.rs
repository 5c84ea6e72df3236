//! CLI for the etagsum checksum tool.

mod commands;

use anyhow::Result;
use clap::{ArgAction, ArgGroup, ArgMatches, CommandFactory, FromArgMatches, Parser};
use etagsum_core::{config, CheckOptions};

use commands::{run_check, run_generate};

/// Name used as the prefix of every diagnostic.
pub const PROGRAM: &str = "etagsum";

/// Top-level CLI: exactly one of generation (`--size`) or verification (`--check`).
#[derive(Debug, Parser)]
#[command(name = "etagsum", version)]
#[command(about = "Compute and check multipart-upload Etags", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["size", "check"])))]
pub struct Cli {
    /// Chunk size (e.g. 8M, 16G, 1048576) followed by the files to digest with it.
    /// Repeatable; the last group reads standard input when it names no files.
    #[arg(short, long, value_name = "SIZE [FILE]", num_args = 1.., action = ArgAction::Append)]
    pub size: Vec<String>,

    /// Read Etags from the FILEs (standard input if none) and check them.
    #[arg(short, long, value_name = "FILE", num_args = 0..)]
    pub check: Option<Vec<String>>,

    /// Don't fail or report status for missing files.
    #[arg(long, requires = "check")]
    pub ignore_missing: bool,

    /// Don't print OK for each successfully verified file.
    #[arg(short, long, requires = "check")]
    pub quiet: bool,

    /// Don't output anything; the exit status shows success.
    #[arg(long, requires = "check")]
    pub status: bool,

    /// Warn about improperly formatted checksum lines.
    #[arg(short, long, requires = "check")]
    pub warn: bool,
}

/// The work selected by one invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    /// One entry per `--size` occurrence: the size literal then its files.
    Generate { occurrences: Vec<Vec<String>> },
    Check {
        listings: Vec<String>,
        options: CheckOptions,
    },
}

impl Cli {
    /// Parse process arguments and run. `Ok(false)` means the run finished
    /// but something failed verification or could not be read.
    pub fn run_from_args() -> Result<bool> {
        let matches = Cli::command().get_matches();
        let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        let mode = cli.mode(&matches);

        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match mode {
            Mode::Generate { occurrences } => run_generate(&cfg, &occurrences),
            Mode::Check { listings, options } => run_check(&cfg, &listings, options),
        }
    }

    /// Resolve the mode; `matches` supplies the `--size` occurrence grouping
    /// that the flattened `size` field loses.
    pub fn mode(self, matches: &ArgMatches) -> Mode {
        match self.check {
            Some(listings) => Mode::Check {
                listings,
                options: CheckOptions {
                    ignore_missing: self.ignore_missing,
                    quiet: self.quiet,
                    status: self.status,
                    warn: self.warn,
                },
            },
            None => Mode::Generate {
                occurrences: size_occurrences(matches),
            },
        }
    }
}

fn size_occurrences(matches: &ArgMatches) -> Vec<Vec<String>> {
    matches
        .get_occurrences::<String>("size")
        .map(|occurrences| {
            occurrences
                .map(|values| values.cloned().collect())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
