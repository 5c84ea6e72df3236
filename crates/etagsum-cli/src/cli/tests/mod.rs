//! CLI parse tests, split by mode.

use super::{Cli, Mode};
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches};

pub(super) fn parse(args: &[&str]) -> Mode {
    let matches = Cli::command().try_get_matches_from(args).unwrap();
    Cli::from_arg_matches(&matches).unwrap().mode(&matches)
}

pub(super) fn parse_err(args: &[&str]) -> ErrorKind {
    Cli::command().try_get_matches_from(args).unwrap_err().kind()
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_requires_a_mode() {
    assert_eq!(parse_err(&["etagsum"]), ErrorKind::MissingRequiredArgument);
}

#[test]
fn cli_rejects_both_modes() {
    assert_eq!(
        parse_err(&["etagsum", "-s", "8M", "a", "-c", "sums"]),
        ErrorKind::ArgumentConflict
    );
}
