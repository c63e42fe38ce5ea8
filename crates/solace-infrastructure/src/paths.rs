//! Unified path management for Solace files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/solace/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/solace/       # Data directory
//! └── guest/                   # Local key-value store (guest mode)
//! ```

use solace_core::error::{Result, SolaceError};
use std::path::PathBuf;

const APP_DIR: &str = "solace";

/// Unified path management for Solace.
pub struct SolacePaths;

impl SolacePaths {
    /// Returns the Solace configuration directory (e.g. `~/.config/solace/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SolaceError::config("Cannot find config directory"))
    }

    /// Returns the Solace data directory (e.g. `~/.local/share/solace/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SolaceError::config("Cannot find data directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory of the guest key-value store.
    pub fn guest_store_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("guest"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = SolacePaths::config_file().unwrap();
        assert!(config_file.ends_with("solace/config.toml"));
        assert!(config_file.starts_with(SolacePaths::config_dir().unwrap()));
    }

    #[test]
    fn test_guest_store_dir() {
        let guest_dir = SolacePaths::guest_store_dir().unwrap();
        assert!(guest_dir.ends_with("guest"));
        assert!(guest_dir.starts_with(SolacePaths::data_dir().unwrap()));
    }
}
