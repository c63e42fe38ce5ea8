//! Guest domain module.
//!
//! Everything a guest accumulates on-device lives in one [`GuestAggregate`]
//! document. Entries are created from drafts, which carry only what the UI
//! supplies; ids and timestamps are stamped by the store.
//!
//! # Module Structure
//!
//! - `model`: The aggregate document and its entry types
//! - `draft`: Partial inputs for appends and preference patches

mod draft;
mod model;

// Re-export public API
pub use draft::{CheckInDraft, JournalEntryDraft, PreferencesPatch, WinDraft};
pub use model::{
    CheckIn, DEFAULT_LANGUAGE, GuestAggregate, GuestSessionId, GuestSummary, JournalEntry,
    Preferences, Win,
};
