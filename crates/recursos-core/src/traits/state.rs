//! Persisted key/value state used for section lists and user settings.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable storage of raw JSON text per key.
///
/// Values are always complete snapshots; a `save` replaces whatever was
/// stored under the key before. Implementations live in `recursos-storage`.
#[async_trait]
pub trait StateStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "file", "memory").
    fn store_type(&self) -> &str;

    /// Load the raw JSON stored under `key`, if any.
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn save(&self, key: &str, raw_json: &str) -> AppResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
