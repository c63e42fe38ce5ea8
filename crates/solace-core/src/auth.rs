//! Authentication state as seen by the guest layer.
//!
//! Sign-up and sign-in mechanics belong to the auth provider; this module
//! only models the transitions the provider reports.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Who the application is currently acting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum AuthState {
    #[default]
    Guest,
    #[serde(rename_all = "camelCase")]
    Authenticated { user_id: String },
}

impl AuthState {
    pub fn is_guest(&self) -> bool {
        matches!(self, AuthState::Guest)
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthState::Guest => None,
            AuthState::Authenticated { user_id } => Some(user_id),
        }
    }
}

/// A change reported by the auth provider.
///
/// `SignedIn` is emitted exactly once per successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthTransition {
    #[serde(rename_all = "camelCase")]
    SignedIn { user_id: String },
    SignedOut,
}

/// Source of auth transitions.
pub trait AuthStateProvider: Send + Sync {
    /// Current state at the time of the call.
    fn current(&self) -> AuthState;

    /// Subscribes to transitions emitted after this call.
    fn subscribe(&self) -> broadcast::Receiver<AuthTransition>;
}
