//! Infrastructure adapters for Solace.
//!
//! Concrete implementations of the domain traits: local key-value stores,
//! the HTTP remote account store, the in-process auth provider, platform
//! paths and configuration loading.

pub mod auth_provider;
pub mod config_service;
pub mod file_kv_store;
pub mod http_remote_store;
pub mod memory_kv_store;
pub mod paths;
pub mod storage;

pub use crate::auth_provider::BroadcastAuthStateProvider;
pub use crate::config_service::ConfigService;
pub use crate::file_kv_store::FileKeyValueStore;
pub use crate::http_remote_store::HttpRemoteAccountStore;
pub use crate::memory_kv_store::InMemoryKeyValueStore;
pub use crate::paths::SolacePaths;
