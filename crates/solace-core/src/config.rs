//! Configuration model.
//!
//! Every field has a default so a partial or missing `config.toml` still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engagement::DEFAULT_PROMPT_THRESHOLD;
use crate::remote::RemoteTable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SolaceConfig {
    pub engagement: EngagementSettings,
    pub storage: StorageSettings,
    pub remote: RemoteSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngagementSettings {
    /// Visit count at which the account prompt becomes eligible
    pub prompt_threshold: u64,
}

impl Default for EngagementSettings {
    fn default() -> Self {
        Self {
            prompt_threshold: DEFAULT_PROMPT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the local key-value files. Platform data dir if unset.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub tables: RemoteTables,
    /// Attach local entry ids to migrated rows so retries cannot duplicate
    pub idempotency_keys: bool,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: 30,
            tables: RemoteTables::default(),
            idempotency_keys: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteTables {
    pub check_ins: String,
    pub wins: String,
    pub journal_entries: String,
}

impl RemoteTables {
    pub fn name_of(&self, table: RemoteTable) -> &str {
        match table {
            RemoteTable::CheckIns => &self.check_ins,
            RemoteTable::Wins => &self.wins,
            RemoteTable::JournalEntries => &self.journal_entries,
        }
    }
}

impl Default for RemoteTables {
    fn default() -> Self {
        Self {
            check_ins: RemoteTable::CheckIns.default_name().to_string(),
            wins: RemoteTable::Wins.default_name().to_string(),
            journal_entries: RemoteTable::JournalEntries.default_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
