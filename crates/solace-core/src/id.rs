//! Device-local identifier generation.
//!
//! Ids are wall-clock millis plus a short random suffix. They are unique
//! enough for one device but not globally; nothing remote relies on them
//! except as a per-user idempotency key.

use chrono::{DateTime, Utc};
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Id for a check-in, win or journal entry: `{millis}-{suffix}`.
pub fn entry_id(now: DateTime<Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), random_suffix())
}

/// Id for a guest session: `guest_{millis}_{suffix}`.
pub fn guest_session_id(now: DateTime<Utc>) -> String {
    format!("guest_{}_{}", now.timestamp_millis(), random_suffix())
}
