use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::DEFAULT_BUFFER_SIZE;

/// Verification defaults (optional `[check]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Warn about improperly formatted listing lines, as if `--warn` were given.
    pub warn: bool,
    /// Skip unreadable listed files, as if `--ignore-missing` were given.
    pub ignore_missing: bool,
}

/// Global configuration loaded from `~/.config/etagsum/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtagConfig {
    /// Size of each read from a target or listing, in bytes.
    pub read_buffer_bytes: usize,
    pub check: CheckConfig,
}

impl Default for EtagConfig {
    fn default() -> Self {
        Self {
            read_buffer_bytes: DEFAULT_BUFFER_SIZE,
            check: CheckConfig::default(),
        }
    }
}

/// Existing config file, if any. Nothing is created.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("etagsum")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load the user's configuration, falling back to defaults when there is none.
pub fn load() -> Result<EtagConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => Ok(EtagConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<EtagConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg = parse(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

fn parse(data: &str) -> Result<EtagConfig> {
    let cfg: EtagConfig = toml::from_str(data)?;
    if cfg.read_buffer_bytes == 0 {
        anyhow::bail!("read_buffer_bytes must be greater than zero");
    }
    Ok(cfg)
}
