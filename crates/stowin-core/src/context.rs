use std::fs;
use std::path::{Path, PathBuf};

use stowin_constants::DEFAULT_PREFIX;
use stowin_error::{Result, StowError};
use stowin_utils::{ensure_dir_exists, expand_tilde};

pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| StowError::Io("could not determine home directory".to_string()))
}

/// Resolve the shared prefix from an optional `--target` argument, creating
/// it if absent. The returned path is canonical so the farm's relative-link
/// arithmetic stays exact.
pub fn resolve_prefix(target: Option<&str>, home: &Path) -> Result<PathBuf> {
    let prefix = match target {
        Some(raw) => expand_tilde(raw, home),
        None => home.join(DEFAULT_PREFIX),
    };
    ensure_dir_exists(&prefix)?;
    Ok(fs::canonicalize(&prefix)?)
}
