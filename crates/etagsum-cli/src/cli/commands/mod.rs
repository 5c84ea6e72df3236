//! CLI command handlers, one file per mode.

mod check;
mod generate;

pub use check::run_check;
pub use generate::run_generate;
