//! HttpRemoteAccountStore - REST implementation of the remote account store.
//!
//! Talks to a PostgREST-style endpoint (`POST {base_url}/rest/v1/{table}`)
//! with one request per batch. When rows carry client entry ids the request
//! asks the server to ignore rows that conflict on
//! `(user_id, client_entry_id)`, which makes a retried migration safe.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use solace_core::config::{RemoteSettings, RemoteTables};
use solace_core::error::{Result, SolaceError};
use solace_core::remote::{CheckInRow, JournalEntryRow, RemoteAccountStore, RemoteTable, WinRow};
use std::time::Duration;

const CONFLICT_COLUMNS: &str = "user_id,client_entry_id";

/// Remote account store backed by HTTP.
#[derive(Clone)]
pub struct HttpRemoteAccountStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    /// Bearer token of the signed-in user; falls back to the API key
    access_token: Option<String>,
    tables: RemoteTables,
}

impl HttpRemoteAccountStore {
    /// Creates a new store with explicit configuration.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        tables: RemoteTables,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolaceError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            access_token: None,
            tables,
        })
    }

    /// Creates a store from the `[remote]` configuration section.
    ///
    /// Returns a config error when no base URL is set.
    pub fn from_settings(settings: &RemoteSettings) -> Result<Self> {
        let base_url = settings
            .base_url
            .clone()
            .ok_or_else(|| SolaceError::config("remote.base_url is not configured"))?;
        Self::new(
            base_url,
            settings.api_key.clone(),
            settings.tables.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Authenticates requests as the signed-in user.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn endpoint(&self, table: RemoteTable) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.tables.name_of(table))
    }

    async fn post_rows<T: Serialize>(
        &self,
        table: RemoteTable,
        rows: &[T],
        deduplicate: bool,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let url = self.endpoint(table);
        tracing::debug!(
            "[HttpRemoteAccountStore] POST {} rows={} deduplicate={}",
            url,
            rows.len(),
            deduplicate
        );

        let mut request = self.client.post(&url).json(rows);
        if deduplicate {
            request = request
                .query(&[("on_conflict", CONFLICT_COLUMNS)])
                .header("Prefer", "return=minimal,resolution=ignore-duplicates");
        } else {
            request = request.header("Prefer", "return=minimal");
        }
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }
        if let Some(token) = self.access_token.as_ref().or(self.api_key.as_ref()) {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SolaceError::remote(format!("{} insert request failed: {}", table, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SolaceError::remote(format!(
            "{} insert rejected with status {}: {}",
            table, status, body
        )))
    }
}

#[async_trait]
impl RemoteAccountStore for HttpRemoteAccountStore {
    async fn insert_check_ins(&self, rows: Vec<CheckInRow>) -> Result<()> {
        let deduplicate = rows.iter().all(|r| r.client_entry_id.is_some());
        self.post_rows(RemoteTable::CheckIns, &rows, deduplicate).await
    }

    async fn insert_wins(&self, rows: Vec<WinRow>) -> Result<()> {
        let deduplicate = rows.iter().all(|r| r.client_entry_id.is_some());
        self.post_rows(RemoteTable::Wins, &rows, deduplicate).await
    }

    async fn insert_journal_entries(&self, rows: Vec<JournalEntryRow>) -> Result<()> {
        let deduplicate = rows.iter().all(|r| r.client_entry_id.is_some());
        self.post_rows(RemoteTable::JournalEntries, &rows, deduplicate)
            .await
    }
}
