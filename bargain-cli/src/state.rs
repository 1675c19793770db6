use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$BARGAIN_HOME`, else `~/.bargain`.
pub fn bargain_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BARGAIN_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bargain"))
}

pub fn ensure_bargain_home() -> Result<PathBuf> {
    let dir = bargain_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
