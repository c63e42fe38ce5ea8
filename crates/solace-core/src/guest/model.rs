//! GuestAggregate domain model.
//!
//! The aggregate is persisted as a single JSON document with camelCase keys,
//! so field names here are the wire names of the stored document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language used when nothing has been chosen yet.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Opaque correlation tag for one device profile's guest session.
///
/// Never sent to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestSessionId(String);

impl GuestSessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single mood check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    /// Mood keyword picked by the user (e.g. `peaceful`)
    pub mood: String,
    /// Display color paired with the mood (e.g. `Warm Sage`)
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A celebrated win.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Win {
    pub id: String,
    pub text: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

/// A journal entry, optionally written against a prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub entry_type: String,
    pub timestamp: DateTime<Utc>,
}

/// Guest preferences. Last write wins, no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub language: String,
    /// Opaque answers collected by the onboarding flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_data: Option<serde_json::Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            onboarding_data: None,
        }
    }
}

/// All activity of one guest session.
///
/// Lists are newest-first. Entries are only ever prepended; nothing is
/// edited in place. `first_visit` is fixed when the document is synthesized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestAggregate {
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
    #[serde(default)]
    pub wins: Vec<Win>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub visit_count: u64,
    pub first_visit: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,
}

impl GuestAggregate {
    /// Creates the zeroed document a fresh guest starts with.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            check_ins: Vec::new(),
            wins: Vec::new(),
            journal_entries: Vec::new(),
            preferences: Preferences::default(),
            visit_count: 0,
            first_visit: now,
            last_visit: now,
        }
    }

    /// Number of entries across check-ins, wins and journal entries.
    pub fn total_entries(&self) -> usize {
        self.check_ins.len() + self.wins.len() + self.journal_entries.len()
    }

    /// Returns true when there is nothing worth migrating.
    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Read-only view used by the upsell prompt.
    pub fn summarize(&self, now: DateTime<Utc>) -> GuestSummary {
        let days_since_first = (now - self.first_visit).num_days().max(0);
        GuestSummary {
            total_entries: self.total_entries(),
            days_since_first,
        }
    }
}

/// Derived counts shown alongside the account-creation prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    pub total_entries: usize,
    /// Whole days elapsed since the first visit; never negative
    pub days_since_first: i64,
}
