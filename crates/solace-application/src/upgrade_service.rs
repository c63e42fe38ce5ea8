//! Guest-to-account upgrade driven by auth transitions.

use solace_core::auth::{AuthState, AuthTransition};
use solace_core::error::Result;
use solace_core::migration::MigrationOutcome;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::guest_data_store::GuestDataStore;
use crate::migration_coordinator::MigrationCoordinator;
use crate::recorder::WellnessRecorder;
use crate::session_identity::SessionIdentity;

/// Reacts to sign-in and sign-out.
///
/// A sign-in retires guest mode first, so new entries go to the remote
/// store, and then migrates whatever the guest left behind. Any leftover
/// guest key counts, so a dismissed prompt or a visit count never carries
/// over into a later guest session. The coordinator runs at most once per
/// transition.
pub struct GuestUpgradeService {
    store: Arc<GuestDataStore>,
    identity: Arc<SessionIdentity>,
    coordinator: Arc<MigrationCoordinator>,
    recorder: Arc<WellnessRecorder>,
}

impl GuestUpgradeService {
    pub fn new(
        store: Arc<GuestDataStore>,
        identity: Arc<SessionIdentity>,
        coordinator: Arc<MigrationCoordinator>,
        recorder: Arc<WellnessRecorder>,
    ) -> Self {
        Self {
            store,
            identity,
            coordinator,
            recorder,
        }
    }

    /// Applies one transition. Returns the migration outcome when a
    /// migration was attempted.
    pub async fn handle(&self, transition: AuthTransition) -> Result<Option<MigrationOutcome>> {
        match transition {
            AuthTransition::SignedIn { user_id } => {
                self.recorder
                    .set_auth_state(AuthState::Authenticated {
                        user_id: user_id.clone(),
                    })
                    .await;

                if !self.store.has_local_state()? {
                    tracing::debug!("[GuestUpgradeService] Signed in without guest data");
                    return Ok(None);
                }

                let outcome = self.coordinator.migrate(&user_id).await?;
                Ok(Some(outcome))
            }
            AuthTransition::SignedOut => {
                self.identity.clear()?;
                self.recorder.set_auth_state(AuthState::Guest).await;
                tracing::info!("[GuestUpgradeService] Signed out, back in guest mode");
                Ok(None)
            }
        }
    }

    /// Handles transitions until the sender side is dropped.
    pub async fn run(&self, mut receiver: broadcast::Receiver<AuthTransition>) {
        loop {
            match receiver.recv().await {
                Ok(transition) => match self.handle(transition).await {
                    Ok(Some(outcome)) if outcome.success => {
                        tracing::info!(
                            "[GuestUpgradeService] Guest data migrated ({} entries)",
                            outcome.migrated_count
                        );
                    }
                    Ok(Some(outcome)) => {
                        tracing::warn!(
                            "[GuestUpgradeService] Migration failed, guest data kept: {}",
                            outcome.error.unwrap_or_default()
                        );
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("[GuestUpgradeService] Failed to apply transition: {}", e);
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[GuestUpgradeService] Missed {} auth transitions",
                        skipped
                    );
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}
