//! Persisted state store implementations.

pub mod file;
pub mod memory;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

use std::sync::Arc;

use recursos_core::config::StateConfig;
use recursos_core::result::AppResult;
use recursos_core::traits::StateStore;

/// Build the state store selected by configuration.
pub async fn from_config(config: &StateConfig) -> AppResult<Arc<dyn StateStore>> {
    if config.in_memory {
        tracing::info!("Using in-memory state store");
        return Ok(Arc::new(MemoryStateStore::new()));
    }
    let store = FileStateStore::new(&config.directory).await?;
    Ok(Arc::new(store))
}
