//! Configuration file resolution and loading
//!
//! Each MOIM module reads an optional TOML file named `<module>.toml` from
//! the platform configuration directory. Values in the file sit below
//! environment variables in the resolution order (module crates document
//! their own ENV → TOML → default precedence).

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Locate the configuration file for a module, if one exists
///
/// Search order:
/// 1. `$XDG_CONFIG_HOME/moim/<module>.toml` (or platform equivalent)
/// 2. `/etc/moim/<module>.toml` (Linux only)
pub fn config_file_path(module: &str) -> Option<PathBuf> {
    let file_name = format!("{}.toml", module);

    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("moim").join(&file_name);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Found user configuration file");
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_path = PathBuf::from("/etc/moim").join(&file_name);
        if system_path.exists() {
            return Some(system_path);
        }
    }

    None
}

/// Load and parse a TOML configuration file
pub fn load_toml<T: DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}
