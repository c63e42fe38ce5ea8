use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use solace_application::{GuestServices, RecordedEntry};
use solace_core::SolaceError;
use solace_core::auth::{AuthState, AuthStateProvider, AuthTransition};
use solace_core::clock::ManualClock;
use solace_core::config::SolaceConfig;
use solace_core::engagement::GateState;
use solace_core::error::Result;
use solace_core::guest::{CheckInDraft, JournalEntryDraft, WinDraft};
use solace_core::kv::{KeyValueStore, keys};
use solace_core::migration::MigrationOutcome;
use solace_core::remote::{CheckInRow, JournalEntryRow, RemoteAccountStore, RemoteTable, WinRow};
use solace_infrastructure::{BroadcastAuthStateProvider, InMemoryKeyValueStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Remote store double that keeps every row it accepted.
///
/// Rows with a `client_entry_id` already seen for the same user are
/// dropped, like a table with a unique constraint and ignore-duplicates.
#[derive(Default)]
struct RecordingRemote {
    check_ins: Mutex<Vec<CheckInRow>>,
    wins: Mutex<Vec<WinRow>>,
    journal_entries: Mutex<Vec<JournalEntryRow>>,
    seen: Mutex<HashSet<(String, String)>>,
    calls: Mutex<Vec<RemoteTable>>,
    fail: Mutex<Option<RemoteTable>>,
}

impl RecordingRemote {
    fn fail_on(&self, table: Option<RemoteTable>) {
        *self.fail.lock().unwrap() = table;
    }

    fn calls(&self) -> Vec<RemoteTable> {
        self.calls.lock().unwrap().clone()
    }

    fn check_ins(&self) -> Vec<CheckInRow> {
        self.check_ins.lock().unwrap().clone()
    }

    fn wins(&self) -> Vec<WinRow> {
        self.wins.lock().unwrap().clone()
    }

    fn begin(&self, table: RemoteTable) -> Result<()> {
        self.calls.lock().unwrap().push(table);
        if *self.fail.lock().unwrap() == Some(table) {
            return Err(SolaceError::remote(format!(
                "Insert into '{table}' failed (status 503)"
            )));
        }
        Ok(())
    }

    fn is_new(&self, user_id: &str, client_entry_id: Option<&String>) -> bool {
        match client_entry_id {
            Some(id) => self
                .seen
                .lock()
                .unwrap()
                .insert((user_id.to_string(), id.clone())),
            None => true,
        }
    }
}

#[async_trait]
impl RemoteAccountStore for RecordingRemote {
    async fn insert_check_ins(&self, rows: Vec<CheckInRow>) -> Result<()> {
        self.begin(RemoteTable::CheckIns)?;
        let fresh = rows
            .into_iter()
            .filter(|row| self.is_new(&row.user_id, row.client_entry_id.as_ref()));
        self.check_ins.lock().unwrap().extend(fresh);
        Ok(())
    }

    async fn insert_wins(&self, rows: Vec<WinRow>) -> Result<()> {
        self.begin(RemoteTable::Wins)?;
        let fresh = rows
            .into_iter()
            .filter(|row| self.is_new(&row.user_id, row.client_entry_id.as_ref()));
        self.wins.lock().unwrap().extend(fresh);
        Ok(())
    }

    async fn insert_journal_entries(&self, rows: Vec<JournalEntryRow>) -> Result<()> {
        self.begin(RemoteTable::JournalEntries)?;
        let fresh = rows
            .into_iter()
            .filter(|row| self.is_new(&row.user_id, row.client_entry_id.as_ref()));
        self.journal_entries.lock().unwrap().extend(fresh);
        Ok(())
    }
}

struct Harness {
    kv: InMemoryKeyValueStore,
    clock: Arc<ManualClock>,
    remote: Arc<RecordingRemote>,
    services: GuestServices,
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap()
}

fn harness() -> Harness {
    harness_with(SolaceConfig::default())
}

fn harness_with(config: SolaceConfig) -> Harness {
    let kv = InMemoryKeyValueStore::new();
    let clock = Arc::new(ManualClock::new(start()));
    let remote = Arc::new(RecordingRemote::default());
    let services = GuestServices::new(
        Arc::new(kv.clone()),
        remote.clone(),
        clock.clone(),
        &config,
    );
    Harness {
        kv,
        clock,
        remote,
        services,
    }
}

fn seed(h: &Harness) {
    let store = &h.services.store;
    store.append_check_in(CheckInDraft::new("peaceful", "Warm Sage")).unwrap();
    h.clock.advance(Duration::minutes(10));
    store.append_check_in(CheckInDraft::new("tired", "Gentle Lavender")).unwrap();
    h.clock.advance(Duration::minutes(10));
    store.append_win(WinDraft::new("got out of bed", "self-care")).unwrap();
}

#[tokio::test]
async fn guest_signs_up_after_three_visits() {
    let h = harness();
    h.services.identity.get_or_create().unwrap();
    seed(&h);

    for _ in 0..3 {
        h.clock.advance(Duration::hours(8));
        h.services.gate.record_visit().unwrap();
    }
    assert!(h.services.gate.should_prompt().unwrap());

    let outcome = h.services.coordinator.migrate("user-7f3a").await.unwrap();
    assert_eq!(outcome, MigrationOutcome::success(3));

    let check_ins = h.remote.check_ins();
    assert_eq!(check_ins.len(), 2);
    assert_eq!(check_ins[0].mood, "tired");
    assert_eq!(check_ins[1].color, "Warm Sage");
    assert_eq!(check_ins[1].created_at, start());
    assert!(check_ins.iter().all(|row| row.user_id == "user-7f3a"));
    assert_eq!(h.remote.wins()[0].text, "got out of bed");

    let aggregate = h.services.store.read().unwrap();
    assert!(aggregate.check_ins.is_empty());
    assert!(aggregate.wins.is_empty());
    assert!(aggregate.journal_entries.is_empty());
    assert_eq!(aggregate.visit_count, 0);
    assert!(h.services.identity.current().unwrap().is_none());
    assert!(!h.services.gate.is_dismissed().unwrap());
}

#[tokio::test]
async fn successful_migration_clears_dismiss_flag() {
    let h = harness();
    seed(&h);
    h.services.gate.dismiss().unwrap();

    let outcome = h.services.coordinator.migrate("user-1").await.unwrap();

    assert!(outcome.success);
    assert!(h.kv.get(keys::UPSELL_DISMISSED).unwrap().is_none());
    assert!(h.kv.get(keys::GUEST_SESSION_ID).unwrap().is_none());
}

#[tokio::test]
async fn failed_migration_leaves_document_byte_identical() {
    for failing in RemoteTable::ALL {
        let h = harness();
        seed(&h);
        h.services
            .store
            .append_journal_entry(JournalEntryDraft::new("long day", "free"))
            .unwrap();
        let session = h.services.identity.get_or_create().unwrap();
        let before = h.kv.get(keys::GUEST_DATA).unwrap().unwrap();

        h.remote.fail_on(Some(failing));
        let outcome = h.services.coordinator.migrate("user-1").await.unwrap();

        assert!(!outcome.success, "{failing} failure reported as success");
        assert_eq!(outcome.migrated_count, 0);
        assert!(outcome.error.is_some());
        assert_eq!(h.kv.get(keys::GUEST_DATA).unwrap().unwrap(), before);
        assert_eq!(h.services.identity.current().unwrap(), Some(session));
    }
}

#[tokio::test]
async fn retry_after_partial_failure_does_not_duplicate() {
    let h = harness();
    seed(&h);

    h.remote.fail_on(Some(RemoteTable::Wins));
    let first = h.services.coordinator.migrate("user-1").await.unwrap();
    assert!(!first.success);
    assert_eq!(h.remote.check_ins().len(), 2);

    h.remote.fail_on(None);
    let second = h.services.coordinator.migrate("user-1").await.unwrap();

    assert_eq!(second, MigrationOutcome::success(3));
    assert_eq!(h.remote.check_ins().len(), 2);
    assert_eq!(h.remote.wins().len(), 1);
    assert!(
        h.remote
            .check_ins()
            .iter()
            .all(|row| row.client_entry_id.is_some())
    );
}

#[tokio::test]
async fn retry_without_idempotency_keys_duplicates() {
    let mut config = SolaceConfig::default();
    config.remote.idempotency_keys = false;
    let h = harness_with(config);
    seed(&h);

    h.remote.fail_on(Some(RemoteTable::Wins));
    h.services.coordinator.migrate("user-1").await.unwrap();
    h.remote.fail_on(None);
    h.services.coordinator.migrate("user-1").await.unwrap();

    assert_eq!(h.remote.check_ins().len(), 4);
    assert!(h.remote.check_ins()[0].client_entry_id.is_none());
}

#[tokio::test]
async fn recorder_routes_by_auth_state() {
    let h = harness();
    let recorder = &h.services.recorder;

    let local = recorder
        .record_check_in(CheckInDraft::new("hopeful", "Sunrise").with_notes("first try"))
        .await
        .unwrap();
    assert!(matches!(local, RecordedEntry::Local { .. }));
    assert!(h.remote.calls().is_empty());

    recorder
        .set_auth_state(AuthState::Authenticated {
            user_id: "user-9".to_string(),
        })
        .await;
    let remote = recorder
        .record_win(WinDraft::new("ran 5k", "movement"))
        .await
        .unwrap();
    recorder
        .record_journal_entry(JournalEntryDraft::new("grateful", "gratitude"))
        .await
        .unwrap();

    assert_eq!(
        remote,
        RecordedEntry::Remote {
            user_id: "user-9".to_string()
        }
    );
    assert_eq!(
        h.remote.calls(),
        vec![RemoteTable::Wins, RemoteTable::JournalEntries]
    );
    assert!(h.remote.wins()[0].client_entry_id.is_none());

    let aggregate = h.services.store.read().unwrap();
    assert_eq!(aggregate.check_ins.len(), 1);
    assert!(aggregate.wins.is_empty());
}

#[tokio::test]
async fn remote_write_failure_surfaces_to_caller() {
    let h = harness();
    h.services
        .recorder
        .set_auth_state(AuthState::Authenticated {
            user_id: "user-9".to_string(),
        })
        .await;
    h.remote.fail_on(Some(RemoteTable::CheckIns));

    let err = h
        .services
        .recorder
        .record_check_in(CheckInDraft::new("low", "Slate"))
        .await
        .unwrap_err();

    assert!(err.is_remote());
}

#[tokio::test]
async fn sign_in_migrates_guest_data_once() {
    let h = harness();
    h.services.identity.get_or_create().unwrap();
    seed(&h);

    let provider = BroadcastAuthStateProvider::new();
    let receiver = provider.subscribe();
    provider.sign_in("user-42");
    provider.sign_in("user-42");
    drop(provider);

    h.services.upgrade.run(receiver).await;

    assert_eq!(
        h.remote.calls(),
        vec![RemoteTable::CheckIns, RemoteTable::Wins]
    );
    assert!(h.services.store.read().unwrap().is_empty());
    assert_eq!(
        h.services.recorder.auth_state().await.user_id(),
        Some("user-42")
    );
}

#[tokio::test]
async fn sign_in_without_guest_data_skips_migration() {
    let h = harness();

    let outcome = h
        .services
        .upgrade
        .handle(AuthTransition::SignedIn {
            user_id: "user-1".to_string(),
        })
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert!(h.remote.calls().is_empty());
    assert!(!h.services.recorder.auth_state().await.is_guest());
}

#[tokio::test]
async fn dismissed_guest_without_entries_starts_fresh_after_sign_in() {
    let h = harness();
    for _ in 0..3 {
        h.clock.advance(Duration::hours(8));
        h.services.gate.record_visit().unwrap();
    }
    h.services.gate.dismiss().unwrap();
    assert!(h.services.identity.current().unwrap().is_none());

    let outcome = h
        .services
        .upgrade
        .handle(AuthTransition::SignedIn {
            user_id: "user-1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, Some(MigrationOutcome::success(0)));
    assert!(h.remote.calls().is_empty());
    assert!(h.kv.get(keys::UPSELL_DISMISSED).unwrap().is_none());
    assert!(h.kv.get(keys::GUEST_DATA).unwrap().is_none());

    h.services.upgrade.handle(AuthTransition::SignedOut).await.unwrap();
    h.services.identity.get_or_create().unwrap();

    assert_eq!(h.services.gate.state().unwrap(), GateState::Fresh);
    assert_eq!(h.services.store.read().unwrap().visit_count, 0);
}

#[tokio::test]
async fn sign_in_with_failing_remote_keeps_guest_data() {
    let h = harness();
    seed(&h);
    h.remote.fail_on(Some(RemoteTable::CheckIns));

    let outcome = h
        .services
        .upgrade
        .handle(AuthTransition::SignedIn {
            user_id: "user-1".to_string(),
        })
        .await
        .unwrap()
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(h.services.store.read().unwrap().total_entries(), 3);
}

#[tokio::test]
async fn sign_out_returns_to_guest_with_new_session() {
    let h = harness();
    let session = h.services.identity.get_or_create().unwrap();
    h.services
        .upgrade
        .handle(AuthTransition::SignedIn {
            user_id: "user-1".to_string(),
        })
        .await
        .unwrap();

    h.services.upgrade.handle(AuthTransition::SignedOut).await.unwrap();

    assert!(h.services.recorder.auth_state().await.is_guest());
    assert!(h.services.identity.current().unwrap().is_none());
    h.clock.advance(Duration::seconds(1));
    assert_ne!(h.services.identity.get_or_create().unwrap(), session);
}

#[test]
fn read_on_empty_store_is_stable() {
    let h = harness();
    let first = h.services.store.read().unwrap();
    let second = h.services.store.read().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.first_visit, start());
}
