//! Local key-value store trait.
//!
//! Guest data, the guest session id and the upsell-dismissed flag all live
//! in one device-local string store. Reads and writes are synchronous; there
//! is no locking across keys, so every caller performs whole-value
//! read-modify-write and the last writer wins.

use crate::error::Result;

/// Logical keys used in the local store.
pub mod keys {
    /// Serialized `GuestAggregate` JSON document.
    pub const GUEST_DATA: &str = "guest_data";
    /// Opaque guest session identifier.
    pub const GUEST_SESSION_ID: &str = "guest_session_id";
    /// Presence flag set once the user dismisses the upsell prompt.
    pub const UPSELL_DISMISSED: &str = "upsell_dismissed";

    /// Every key owned by a guest session.
    pub const ALL: [&str; 3] = [GUEST_DATA, GUEST_SESSION_ID, UPSELL_DISMISSED];
}

/// Device-local string store.
///
/// Implementations must make `set` durable before returning and treat
/// `remove` of an absent key as success.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`.
    fn remove(&self, key: &str) -> Result<()>;
}
