//! CLI command implementations

pub mod show;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use saldo_core::Config;

/// Resolve the saldo directory: `--dir`/`SALDO_DIR` override, or `~/.saldo`
pub fn saldo_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir,
        None => dirs::home_dir()
            .context("Could not find home directory")?
            .join(".saldo"),
    };

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create saldo directory: {}", dir.display()))?;
    Ok(dir)
}

/// Load settings from the saldo directory
pub fn load_config(dir: &Path) -> Result<Config> {
    Config::load(dir)
        .with_context(|| format!("Failed to load settings from {}", dir.display()))
}
