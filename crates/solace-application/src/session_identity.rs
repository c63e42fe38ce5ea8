//! Guest session identity.

use solace_core::clock::Clock;
use solace_core::error::Result;
use solace_core::guest::GuestSessionId;
use solace_core::id;
use solace_core::kv::{KeyValueStore, keys};
use std::sync::Arc;

/// Lazily created, persisted correlation id for the guest session.
pub struct SessionIdentity {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SessionIdentity {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    /// Returns the persisted id, generating and storing one on first use.
    pub fn get_or_create(&self) -> Result<GuestSessionId> {
        if let Some(existing) = self.current()? {
            return Ok(existing);
        }

        let session_id = GuestSessionId::new(id::guest_session_id(self.clock.now()));
        self.kv.set(keys::GUEST_SESSION_ID, session_id.as_str())?;
        tracing::info!("[SessionIdentity] Started guest session {}", session_id);
        Ok(session_id)
    }

    /// Returns the persisted id without creating one.
    pub fn current(&self) -> Result<Option<GuestSessionId>> {
        Ok(self
            .kv
            .get(keys::GUEST_SESSION_ID)?
            .filter(|raw| !raw.is_empty())
            .map(GuestSessionId::new))
    }

    pub fn clear(&self) -> Result<()> {
        self.kv.remove(keys::GUEST_SESSION_ID)?;
        tracing::debug!("[SessionIdentity] Cleared guest session id");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use solace_core::clock::ManualClock;
    use solace_infrastructure::InMemoryKeyValueStore;

    fn identity() -> (SessionIdentity, InMemoryKeyValueStore) {
        let kv = InMemoryKeyValueStore::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 2, 14, 8, 30, 0).unwrap());
        (SessionIdentity::new(Arc::new(kv.clone()), Arc::new(clock)), kv)
    }

    #[test]
    fn test_get_or_create_is_stable() {
        let (identity, kv) = identity();
        assert!(identity.current().unwrap().is_none());

        let first = identity.get_or_create().unwrap();
        let second = identity.get_or_create().unwrap();

        assert_eq!(first, second);
        assert!(first.as_str().starts_with("guest_"));
        assert_eq!(
            kv.get(keys::GUEST_SESSION_ID).unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[test]
    fn test_clear_rotates_id() {
        let (identity, _) = identity();
        let first = identity.get_or_create().unwrap();

        identity.clear().unwrap();
        assert!(identity.current().unwrap().is_none());

        let second = identity.get_or_create().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_millisecond_sessions_differ() {
        let (a, _) = identity();
        let (b, _) = identity();
        assert_ne!(a.get_or_create().unwrap(), b.get_or_create().unwrap());
    }
}
