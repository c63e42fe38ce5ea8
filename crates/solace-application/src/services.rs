//! Wiring of the guest-mode components over one key-value store.

use solace_core::clock::Clock;
use solace_core::config::SolaceConfig;
use solace_core::kv::KeyValueStore;
use solace_core::remote::RemoteAccountStore;
use std::sync::Arc;

use crate::engagement_gate::EngagementGate;
use crate::guest_data_store::GuestDataStore;
use crate::migration_coordinator::MigrationCoordinator;
use crate::recorder::WellnessRecorder;
use crate::session_identity::SessionIdentity;
use crate::upgrade_service::GuestUpgradeService;

/// Every component sharing the same store, clock and remote.
#[derive(Clone)]
pub struct GuestServices {
    pub store: Arc<GuestDataStore>,
    pub identity: Arc<SessionIdentity>,
    pub gate: Arc<EngagementGate>,
    pub coordinator: Arc<MigrationCoordinator>,
    pub recorder: Arc<WellnessRecorder>,
    pub upgrade: Arc<GuestUpgradeService>,
}

impl GuestServices {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteAccountStore>,
        clock: Arc<dyn Clock>,
        config: &SolaceConfig,
    ) -> Self {
        let store = Arc::new(GuestDataStore::new(kv.clone(), clock.clone()));
        let identity = Arc::new(SessionIdentity::new(kv.clone(), clock.clone()));
        let gate = Arc::new(EngagementGate::new(
            store.clone(),
            kv,
            config.engagement.prompt_threshold,
        ));
        let coordinator = Arc::new(
            MigrationCoordinator::new(store.clone(), identity.clone(), remote.clone())
                .with_idempotency_keys(config.remote.idempotency_keys),
        );
        let recorder = Arc::new(WellnessRecorder::new(store.clone(), remote, clock));
        let upgrade = Arc::new(GuestUpgradeService::new(
            store.clone(),
            identity.clone(),
            coordinator.clone(),
            recorder.clone(),
        ));

        Self {
            store,
            identity,
            gate,
            coordinator,
            recorder,
            upgrade,
        }
    }
}
