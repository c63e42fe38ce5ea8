//! Configuration service implementation.
//!
//! Loads [`SolaceConfig`] from `config.toml`, then applies environment
//! overrides. Configuration priority: environment variables > config.toml >
//! built-in defaults.

use crate::paths::SolacePaths;
use crate::storage::AtomicFile;
use solace_core::config::SolaceConfig;
use solace_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const ENV_REMOTE_URL: &str = "SOLACE_REMOTE_URL";
pub const ENV_REMOTE_API_KEY: &str = "SOLACE_REMOTE_API_KEY";
pub const ENV_DATA_DIR: &str = "SOLACE_DATA_DIR";

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<SolaceConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default `config.toml`.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(SolacePaths::config_file()?))
    }

    /// Creates a service reading the given file (for testing or `--config`).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<SolaceConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes `config` to the config file and refreshes the cache.
    pub fn save(&self, config: &SolaceConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        AtomicFile::new(self.path.clone()).write(&content)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Directory of the local guest store, falling back to the platform default.
    pub fn guest_store_dir(config: &SolaceConfig) -> Result<PathBuf> {
        match &config.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => SolacePaths::guest_store_dir(),
        }
    }

    fn load(&self) -> Result<SolaceConfig> {
        let from_file = match AtomicFile::new(self.path.clone()).read()? {
            Some(content) if !content.trim().is_empty() => toml::from_str(&content)?,
            _ => {
                tracing::debug!(
                    "[ConfigService] No config at {}, using defaults",
                    self.path.display()
                );
                SolaceConfig::default()
            }
        };
        Ok(apply_env_overrides(from_file, |name| std::env::var(name).ok()))
    }
}

/// Applies `SOLACE_*` overrides on top of a loaded configuration.
pub fn apply_env_overrides<F>(mut config: SolaceConfig, lookup: F) -> SolaceConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_REMOTE_URL).filter(|v| !v.is_empty()) {
        config.remote.base_url = Some(url);
    }
    if let Some(key) = lookup(ENV_REMOTE_API_KEY).filter(|v| !v.is_empty()) {
        config.remote.api_key = Some(key);
    }
    if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }
    config
}
