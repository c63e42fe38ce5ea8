//! In-process auth state provider.
//!
//! The real sign-up/sign-in flow lives in the auth layer. This provider is
//! the seam it reports into: the auth layer calls `sign_in`/`sign_out`, and
//! subscribers receive the matching [`AuthTransition`].

use solace_core::auth::{AuthState, AuthStateProvider, AuthTransition};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 16;

/// Auth provider that fans transitions out over a broadcast channel.
#[derive(Clone)]
pub struct BroadcastAuthStateProvider {
    sender: broadcast::Sender<AuthTransition>,
    state: Arc<RwLock<AuthState>>,
}

impl BroadcastAuthStateProvider {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self {
            sender,
            state: Arc::new(RwLock::new(AuthState::Guest)),
        }
    }

    /// Records a successful sign-up or sign-in and notifies subscribers.
    ///
    /// Signing in as the user who is already signed in emits nothing.
    pub fn sign_in(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            if state.user_id() == Some(user_id.as_str()) {
                return;
            }
            *state = AuthState::Authenticated {
                user_id: user_id.clone(),
            };
        }
        self.emit(AuthTransition::SignedIn { user_id });
    }

    /// Records a sign-out and notifies subscribers.
    pub fn sign_out(&self) {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            if state.is_guest() {
                return;
            }
            *state = AuthState::Guest;
        }
        self.emit(AuthTransition::SignedOut);
    }

    fn emit(&self, transition: AuthTransition) {
        // No subscribers is fine; the state above is still updated
        if self.sender.send(transition).is_err() {
            tracing::debug!("[BroadcastAuthStateProvider] transition emitted with no subscribers");
        }
    }
}

impl Default for BroadcastAuthStateProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateProvider for BroadcastAuthStateProvider {
    fn current(&self) -> AuthState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthTransition> {
        self.sender.subscribe()
    }
}
