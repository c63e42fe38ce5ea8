//! Application layer for Solace guest mode.
//!
//! - [`GuestDataStore`]: the on-device aggregate
//! - [`SessionIdentity`]: guest session correlation id
//! - [`EngagementGate`]: when to invite the guest to sign up
//! - [`MigrationCoordinator`]: guest data to the remote account
//! - [`WellnessRecorder`] and [`GuestUpgradeService`]: routing by auth state

pub mod engagement_gate;
pub mod guest_data_store;
pub mod migration_coordinator;
pub mod recorder;
pub mod services;
pub mod session_identity;
pub mod upgrade_service;

pub use engagement_gate::EngagementGate;
pub use guest_data_store::GuestDataStore;
pub use migration_coordinator::MigrationCoordinator;
pub use recorder::{RecordedEntry, WellnessRecorder};
pub use services::GuestServices;
pub use session_identity::SessionIdentity;
pub use upgrade_service::GuestUpgradeService;
