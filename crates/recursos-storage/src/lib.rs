//! # recursos-storage
//!
//! Persisted state stores (one JSON document per key) and upload gateway
//! implementations for Google Cloud Storage, Google Drive, and an
//! in-process store.

pub mod gateways;
pub mod state;

pub use gateways::from_config as gateway_from_config;
pub use state::{FileStateStore, MemoryStateStore};
