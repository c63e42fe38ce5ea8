//! Domain layer for Solace.
//!
//! Holds the guest aggregate model, the remote row shapes, and the traits
//! the application layer is written against (`KeyValueStore`,
//! `RemoteAccountStore`, `AuthStateProvider`, `Clock`). Nothing in this
//! crate performs I/O.

pub mod auth;
pub mod clock;
pub mod config;
pub mod engagement;
pub mod error;
pub mod guest;
pub mod id;
pub mod kv;
pub mod migration;
pub mod remote;

// Re-export common error type
pub use error::SolaceError;
