use anyhow::{Context, Result};
use async_trait::async_trait;
use solace_application::GuestServices;
use solace_core::clock::SystemClock;
use solace_core::config::SolaceConfig;
use solace_core::error::{Result as SolaceResult, SolaceError};
use solace_core::kv::KeyValueStore;
use solace_core::remote::{CheckInRow, JournalEntryRow, RemoteAccountStore, WinRow};
use solace_infrastructure::{ConfigService, FileKeyValueStore, HttpRemoteAccountStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Loads configuration, letting `--data-dir` win over file and environment.
pub fn load_config(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<SolaceConfig> {
    let service = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new_default().context("Failed to locate config directory")?,
    };
    let mut config = service
        .get_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;

    if let Some(dir) = data_dir {
        config.storage.data_dir = Some(dir);
    }
    Ok(config)
}

/// Everything a command needs, wired over the on-disk guest store.
pub struct AppContext {
    pub config: SolaceConfig,
    pub data_dir: PathBuf,
    pub services: GuestServices,
}

impl AppContext {
    pub fn new(config: SolaceConfig, access_token: Option<String>) -> Result<Self> {
        let data_dir = ConfigService::guest_store_dir(&config)
            .context("Failed to resolve guest store directory")?;
        tracing::debug!("[AppContext] Guest store at {}", data_dir.display());
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(data_dir.clone()));

        let remote: Arc<dyn RemoteAccountStore> = if config.remote.base_url.is_some() {
            let mut store = HttpRemoteAccountStore::from_settings(&config.remote)
                .context("Failed to configure remote store")?;
            if let Some(token) = access_token {
                store = store.with_access_token(token);
            }
            Arc::new(store)
        } else {
            Arc::new(OfflineRemote)
        };

        let services = GuestServices::new(kv, remote, Arc::new(SystemClock), &config);
        Ok(Self {
            config,
            data_dir,
            services,
        })
    }

    pub fn remote_configured(&self) -> bool {
        self.config.remote.base_url.is_some()
    }
}

/// Stand-in used when no remote is configured. Every insert fails.
struct OfflineRemote;

impl OfflineRemote {
    fn unavailable() -> SolaceError {
        SolaceError::config("remote.base_url is not configured")
    }
}

#[async_trait]
impl RemoteAccountStore for OfflineRemote {
    async fn insert_check_ins(&self, _rows: Vec<CheckInRow>) -> SolaceResult<()> {
        Err(Self::unavailable())
    }

    async fn insert_wins(&self, _rows: Vec<WinRow>) -> SolaceResult<()> {
        Err(Self::unavailable())
    }

    async fn insert_journal_entries(&self, _rows: Vec<JournalEntryRow>) -> SolaceResult<()> {
        Err(Self::unavailable())
    }
}
