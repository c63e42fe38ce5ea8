//! Routes new entries by auth state.
//!
//! Guests write to the local aggregate; signed-in users write straight to
//! the remote store, one row per call.

use solace_core::auth::AuthState;
use solace_core::clock::Clock;
use solace_core::error::Result;
use solace_core::guest::{CheckInDraft, JournalEntryDraft, WinDraft};
use solace_core::id;
use solace_core::remote::{CheckInRow, JournalEntryRow, RemoteAccountStore, WinRow};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::guest_data_store::GuestDataStore;

/// Where a recorded entry went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEntry {
    /// Appended to the guest aggregate under this local id
    Local { id: String },
    /// Inserted for this authenticated user
    Remote { user_id: String },
}

pub struct WellnessRecorder {
    store: Arc<GuestDataStore>,
    remote: Arc<dyn RemoteAccountStore>,
    clock: Arc<dyn Clock>,
    auth: RwLock<AuthState>,
}

impl WellnessRecorder {
    pub fn new(
        store: Arc<GuestDataStore>,
        remote: Arc<dyn RemoteAccountStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            remote,
            clock,
            auth: RwLock::new(AuthState::Guest),
        }
    }

    pub async fn auth_state(&self) -> AuthState {
        self.auth.read().await.clone()
    }

    pub async fn set_auth_state(&self, state: AuthState) {
        let mut auth = self.auth.write().await;
        tracing::debug!("[WellnessRecorder] Auth state {:?} -> {:?}", *auth, state);
        *auth = state;
    }

    pub async fn record_check_in(&self, draft: CheckInDraft) -> Result<RecordedEntry> {
        match self.auth_state().await {
            AuthState::Guest => {
                let entry = self.store.append_check_in(draft)?;
                Ok(RecordedEntry::Local { id: entry.id })
            }
            AuthState::Authenticated { user_id } => {
                let now = self.clock.now();
                let entry = draft.into_entry(id::entry_id(now), now);
                let row = CheckInRow::from_entry(&user_id, &entry, false);
                self.remote.insert_check_ins(vec![row]).await?;
                Ok(RecordedEntry::Remote { user_id })
            }
        }
    }

    pub async fn record_win(&self, draft: WinDraft) -> Result<RecordedEntry> {
        match self.auth_state().await {
            AuthState::Guest => {
                let entry = self.store.append_win(draft)?;
                Ok(RecordedEntry::Local { id: entry.id })
            }
            AuthState::Authenticated { user_id } => {
                let now = self.clock.now();
                let entry = draft.into_entry(id::entry_id(now), now);
                let row = WinRow::from_entry(&user_id, &entry, false);
                self.remote.insert_wins(vec![row]).await?;
                Ok(RecordedEntry::Remote { user_id })
            }
        }
    }

    pub async fn record_journal_entry(&self, draft: JournalEntryDraft) -> Result<RecordedEntry> {
        match self.auth_state().await {
            AuthState::Guest => {
                let entry = self.store.append_journal_entry(draft)?;
                Ok(RecordedEntry::Local { id: entry.id })
            }
            AuthState::Authenticated { user_id } => {
                let now = self.clock.now();
                let entry = draft.into_entry(id::entry_id(now), now);
                let row = JournalEntryRow::from_entry(&user_id, &entry, false);
                self.remote.insert_journal_entries(vec![row]).await?;
                Ok(RecordedEntry::Remote { user_id })
            }
        }
    }
}
