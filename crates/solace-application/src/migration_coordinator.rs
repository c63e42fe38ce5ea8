//! Migration of a guest aggregate into the authenticated remote store.
//!
//! One batch per list, sent in order and each awaited before the next.
//! Local state is cleared only after every non-empty batch succeeded; on
//! the first failure nothing local is touched, so a retry starts from the
//! exact same document.

use solace_core::error::Result;
use solace_core::guest::GuestAggregate;
use solace_core::migration::MigrationOutcome;
use solace_core::remote::{CheckInRow, JournalEntryRow, RemoteAccountStore, RemoteTable, WinRow};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::guest_data_store::GuestDataStore;
use crate::session_identity::SessionIdentity;

pub struct MigrationCoordinator {
    store: Arc<GuestDataStore>,
    identity: Arc<SessionIdentity>,
    remote: Arc<dyn RemoteAccountStore>,
    idempotency_keys: bool,
    /// Serializes overlapping `migrate` calls
    in_flight: Mutex<()>,
}

impl MigrationCoordinator {
    pub fn new(
        store: Arc<GuestDataStore>,
        identity: Arc<SessionIdentity>,
        remote: Arc<dyn RemoteAccountStore>,
    ) -> Self {
        Self {
            store,
            identity,
            remote,
            idempotency_keys: true,
            in_flight: Mutex::new(()),
        }
    }

    /// Whether migrated rows carry the local entry id as `client_entry_id`.
    pub fn with_idempotency_keys(mut self, enabled: bool) -> Self {
        self.idempotency_keys = enabled;
        self
    }

    /// Moves every guest entry to `user_id`'s remote account.
    ///
    /// Remote failures come back as `Ok` with `success == false`; only
    /// local-store failures are returned as `Err`.
    pub async fn migrate(&self, user_id: &str) -> Result<MigrationOutcome> {
        let _guard = self.in_flight.lock().await;

        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Ok(MigrationOutcome::failure("user id is required"));
        }

        let aggregate = self.store.read()?;
        let total = aggregate.total_entries();

        if total == 0 {
            tracing::debug!("[MigrationCoordinator] Nothing to migrate");
            self.retire_guest()?;
            return Ok(MigrationOutcome::success(0));
        }

        tracing::info!(
            "[MigrationCoordinator] Migrating {} guest entries (check_ins={}, wins={}, journal_entries={})",
            total,
            aggregate.check_ins.len(),
            aggregate.wins.len(),
            aggregate.journal_entries.len()
        );

        if let Err(message) = self.send_batches(user_id, &aggregate).await {
            return Ok(MigrationOutcome::failure(message));
        }

        self.retire_guest()?;
        tracing::info!("[MigrationCoordinator] Migrated {} entries", total);
        Ok(MigrationOutcome::success(total))
    }

    async fn send_batches(
        &self,
        user_id: &str,
        aggregate: &GuestAggregate,
    ) -> std::result::Result<(), String> {
        let keyed = self.idempotency_keys;

        let check_ins: Vec<CheckInRow> = aggregate
            .check_ins
            .iter()
            .map(|entry| CheckInRow::from_entry(user_id, entry, keyed))
            .collect();
        if !check_ins.is_empty() {
            let result = self.remote.insert_check_ins(check_ins).await;
            batch_result(RemoteTable::CheckIns, result)?;
        }

        let wins: Vec<WinRow> = aggregate
            .wins
            .iter()
            .map(|entry| WinRow::from_entry(user_id, entry, keyed))
            .collect();
        if !wins.is_empty() {
            let result = self.remote.insert_wins(wins).await;
            batch_result(RemoteTable::Wins, result)?;
        }

        let journal_entries: Vec<JournalEntryRow> = aggregate
            .journal_entries
            .iter()
            .map(|entry| JournalEntryRow::from_entry(user_id, entry, keyed))
            .collect();
        if !journal_entries.is_empty() {
            let result = self.remote.insert_journal_entries(journal_entries).await;
            batch_result(RemoteTable::JournalEntries, result)?;
        }

        Ok(())
    }

    fn retire_guest(&self) -> Result<()> {
        self.store.clear()?;
        self.identity.clear()
    }
}

fn batch_result(table: RemoteTable, result: Result<()>) -> std::result::Result<(), String> {
    result.map_err(|err| {
        tracing::warn!(
            "[MigrationCoordinator] {} batch failed, keeping guest data: {}",
            table,
            err
        );
        err.to_string()
    })
}
