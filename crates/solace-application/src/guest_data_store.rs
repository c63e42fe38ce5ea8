//! Local aggregate store.
//!
//! Every mutation is one whole-aggregate transaction: read the full
//! document, change it in memory, write the full document back. Nothing is
//! ever persisted per entry, so the document on disk is always one the
//! store wrote in a single `set`.

use solace_core::clock::Clock;
use solace_core::error::Result;
use solace_core::guest::{
    CheckIn, CheckInDraft, GuestAggregate, GuestSummary, JournalEntry, JournalEntryDraft,
    Preferences, PreferencesPatch, Win, WinDraft,
};
use solace_core::id;
use solace_core::kv::{KeyValueStore, keys};
use std::sync::Arc;

/// Owns the on-device [`GuestAggregate`] document.
///
/// There is no lock around the read-modify-write. Two stores over the same
/// key-value store (two tabs) interleave freely and the last writer wins.
pub struct GuestDataStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl GuestDataStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    /// Returns the current document, synthesizing and persisting a default
    /// one if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written, or if the
    /// stored document is not valid JSON. A corrupt document is never
    /// replaced silently.
    pub fn read(&self) -> Result<GuestAggregate> {
        if let Some(aggregate) = self.peek()? {
            return Ok(aggregate);
        }

        let aggregate = GuestAggregate::new(self.clock.now());
        self.write(&aggregate)?;
        tracing::debug!("[GuestDataStore] Synthesized default guest document");
        Ok(aggregate)
    }

    /// Returns the stored document without synthesizing one.
    pub fn peek(&self) -> Result<Option<GuestAggregate>> {
        match self.kv.get(keys::GUEST_DATA)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Runs `mutate` as a whole-aggregate transaction and persists the result.
    ///
    /// The write happens only after `mutate` returns; if the write fails the
    /// stored document is unchanged.
    pub(crate) fn update<F, T>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut GuestAggregate) -> T,
    {
        let mut aggregate = self.read()?;
        let result = mutate(&mut aggregate);
        self.write(&aggregate)?;
        Ok(result)
    }

    /// Prepends a new check-in and returns it.
    pub fn append_check_in(&self, draft: CheckInDraft) -> Result<CheckIn> {
        let now = self.clock.now();
        let entry = draft.into_entry(id::entry_id(now), now);
        let stored = entry.clone();
        let total = self.update(move |aggregate| {
            aggregate.check_ins.insert(0, stored);
            aggregate.check_ins.len()
        })?;
        tracing::debug!(
            "[GuestDataStore] Appended check-in id={} (check_ins={})",
            entry.id,
            total
        );
        Ok(entry)
    }

    /// Prepends a new win and returns it.
    pub fn append_win(&self, draft: WinDraft) -> Result<Win> {
        let now = self.clock.now();
        let entry = draft.into_entry(id::entry_id(now), now);
        let stored = entry.clone();
        let total = self.update(move |aggregate| {
            aggregate.wins.insert(0, stored);
            aggregate.wins.len()
        })?;
        tracing::debug!(
            "[GuestDataStore] Appended win id={} (wins={})",
            entry.id,
            total
        );
        Ok(entry)
    }

    /// Prepends a new journal entry and returns it.
    pub fn append_journal_entry(&self, draft: JournalEntryDraft) -> Result<JournalEntry> {
        let now = self.clock.now();
        let entry = draft.into_entry(id::entry_id(now), now);
        let stored = entry.clone();
        let total = self.update(move |aggregate| {
            aggregate.journal_entries.insert(0, stored);
            aggregate.journal_entries.len()
        })?;
        tracing::debug!(
            "[GuestDataStore] Appended journal entry id={} (journal_entries={})",
            entry.id,
            total
        );
        Ok(entry)
    }

    /// Shallow-merges `patch` into the preferences and returns the result.
    pub fn update_preferences(&self, patch: PreferencesPatch) -> Result<Preferences> {
        self.update(|aggregate| {
            patch.apply_to(&mut aggregate.preferences);
            aggregate.preferences.clone()
        })
    }

    /// Counts one guest-mode activation and returns the new visit count.
    pub fn increment_visit_count(&self) -> Result<u64> {
        let now = self.clock.now();
        let count = self.update(|aggregate| {
            aggregate.visit_count += 1;
            aggregate.last_visit = now;
            aggregate.visit_count
        })?;
        tracing::debug!("[GuestDataStore] Visit count is now {}", count);
        Ok(count)
    }

    /// Removes the document together with the session id and the
    /// upsell-dismissed flag. Irreversible.
    pub fn clear(&self) -> Result<()> {
        for key in keys::ALL {
            self.kv.remove(key)?;
        }
        tracing::info!("[GuestDataStore] Cleared all guest state");
        Ok(())
    }

    /// Returns true if any guest key (document, session id or dismiss
    /// flag) is present.
    pub fn has_local_state(&self) -> Result<bool> {
        for key in keys::ALL {
            if self.kv.get(key)?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Entry totals and days since the first visit.
    pub fn summarize(&self) -> Result<GuestSummary> {
        let aggregate = self.read()?;
        Ok(aggregate.summarize(self.clock.now()))
    }

    fn write(&self, aggregate: &GuestAggregate) -> Result<()> {
        let raw = serde_json::to_string(aggregate)?;
        self.kv.set(keys::GUEST_DATA, &raw)
    }
}
