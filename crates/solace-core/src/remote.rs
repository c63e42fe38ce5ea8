//! Remote account store contract.
//!
//! The remote store is relational and keyed by authenticated user id. It
//! accepts batched inserts only; nothing is read back and no transaction
//! spans the three tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::guest::{CheckIn, JournalEntry, Win};

/// The three remote tables guest data lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteTable {
    CheckIns,
    Wins,
    JournalEntries,
}

impl RemoteTable {
    pub const ALL: [RemoteTable; 3] = [
        RemoteTable::CheckIns,
        RemoteTable::Wins,
        RemoteTable::JournalEntries,
    ];

    /// Default table name on the remote side.
    pub fn default_name(&self) -> &'static str {
        match self {
            RemoteTable::CheckIns => "check_ins",
            RemoteTable::Wins => "wins",
            RemoteTable::JournalEntries => "journal_entries",
        }
    }
}

impl fmt::Display for RemoteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Remote check-in row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInRow {
    pub user_id: String,
    pub mood: String,
    pub color: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Local entry id, used by the remote side to reject duplicates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_entry_id: Option<String>,
}

impl CheckInRow {
    /// Builds a row from a local entry, keeping its timestamp as `created_at`.
    pub fn from_entry(user_id: &str, entry: &CheckIn, with_client_id: bool) -> Self {
        Self {
            user_id: user_id.to_string(),
            mood: entry.mood.clone(),
            color: entry.color.clone(),
            notes: entry.notes.clone(),
            created_at: entry.timestamp,
            client_entry_id: with_client_id.then(|| entry.id.clone()),
        }
    }
}

/// Remote win row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinRow {
    pub user_id: String,
    pub text: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_entry_id: Option<String>,
}

impl WinRow {
    pub fn from_entry(user_id: &str, entry: &Win, with_client_id: bool) -> Self {
        Self {
            user_id: user_id.to_string(),
            text: entry.text.clone(),
            category: entry.category.clone(),
            created_at: entry.timestamp,
            client_entry_id: with_client_id.then(|| entry.id.clone()),
        }
    }
}

/// Remote journal-entry row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntryRow {
    pub user_id: String,
    pub content: String,
    pub prompt: Option<String>,
    pub entry_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_entry_id: Option<String>,
}

impl JournalEntryRow {
    pub fn from_entry(user_id: &str, entry: &JournalEntry, with_client_id: bool) -> Self {
        Self {
            user_id: user_id.to_string(),
            content: entry.content.clone(),
            prompt: entry.prompt.clone(),
            entry_type: entry.entry_type.clone(),
            created_at: entry.timestamp,
            client_entry_id: with_client_id.then(|| entry.id.clone()),
        }
    }
}

/// Batched insert interface of the remote account store.
///
/// Each call is one network operation. An `Err` means the batch must be
/// assumed not written; an `Ok` means every row was accepted.
#[async_trait]
pub trait RemoteAccountStore: Send + Sync {
    async fn insert_check_ins(&self, rows: Vec<CheckInRow>) -> Result<()>;

    async fn insert_wins(&self, rows: Vec<WinRow>) -> Result<()>;

    async fn insert_journal_entries(&self, rows: Vec<JournalEntryRow>) -> Result<()>;
}
