//! Engagement gate deciding when to invite a guest to create an account.
//!
//! State is never cached here. Every query recomputes [`GateState`] from
//! the persisted visit count and the sticky dismiss flag.

use solace_core::engagement::GateState;
use solace_core::error::Result;
use solace_core::guest::GuestSummary;
use solace_core::kv::{KeyValueStore, keys};
use std::sync::Arc;

use crate::guest_data_store::GuestDataStore;

const DISMISSED_VALUE: &str = "true";

pub struct EngagementGate {
    store: Arc<GuestDataStore>,
    kv: Arc<dyn KeyValueStore>,
    threshold: u64,
}

impl EngagementGate {
    pub fn new(store: Arc<GuestDataStore>, kv: Arc<dyn KeyValueStore>, threshold: u64) -> Self {
        Self {
            store,
            kv,
            threshold,
        }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Counts one guest-mode activation and returns the resulting state.
    pub fn record_visit(&self) -> Result<GateState> {
        let count = self.store.increment_visit_count()?;
        let state = GateState::evaluate(count, self.is_dismissed()?, self.threshold);

        if count == self.threshold && state == GateState::Eligible {
            tracing::info!(
                "[EngagementGate] Visit threshold {} reached, account prompt eligible",
                self.threshold
            );
        }
        Ok(state)
    }

    /// Current state. Reads only; a missing document counts as zero visits.
    pub fn state(&self) -> Result<GateState> {
        let visit_count = self
            .store
            .peek()?
            .map(|aggregate| aggregate.visit_count)
            .unwrap_or(0);
        Ok(GateState::evaluate(
            visit_count,
            self.is_dismissed()?,
            self.threshold,
        ))
    }

    pub fn should_prompt(&self) -> Result<bool> {
        Ok(self.state()?.should_prompt())
    }

    /// Sets the sticky flag. Only `GuestDataStore::clear` removes it.
    pub fn dismiss(&self) -> Result<()> {
        self.kv.set(keys::UPSELL_DISMISSED, DISMISSED_VALUE)?;
        tracing::info!("[EngagementGate] Account prompt dismissed");
        Ok(())
    }

    pub fn is_dismissed(&self) -> Result<bool> {
        Ok(self.kv.get(keys::UPSELL_DISMISSED)?.is_some())
    }

    pub fn summarize(&self) -> Result<GuestSummary> {
        self.store.summarize()
    }
}
