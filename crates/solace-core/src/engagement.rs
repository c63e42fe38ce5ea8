//! Engagement gate states.
//!
//! The gate is a pure function of the persisted visit count and the sticky
//! dismissed flag; nothing here is cached.

use serde::{Deserialize, Serialize};

/// Visits required before the account-creation prompt is offered.
pub const DEFAULT_PROMPT_THRESHOLD: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateState {
    /// Below the visit threshold
    Fresh,
    /// At or above the threshold and never dismissed
    Eligible,
    /// The user said "not now"; terminal for the guest session
    Dismissed,
}

impl GateState {
    /// Derives the state from persisted values. Dismissal wins over the count.
    pub fn evaluate(visit_count: u64, dismissed: bool, threshold: u64) -> Self {
        if dismissed {
            GateState::Dismissed
        } else if visit_count >= threshold {
            GateState::Eligible
        } else {
            GateState::Fresh
        }
    }

    pub fn should_prompt(&self) -> bool {
        matches!(self, GateState::Eligible)
    }
}
