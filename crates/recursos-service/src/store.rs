//! Loading and persisting section lists and user settings.

use std::sync::Arc;

use tracing::{debug, warn};

use recursos_core::result::AppResult;
use recursos_core::traits::StateStore;
use recursos_entity::{Resource, Section, Theme};

use crate::seed::seed_resources;

/// Key holding the color theme.
pub const THEME_KEY: &str = "theme";

/// Key holding the upload bucket name.
pub const BUCKET_KEY: &str = "gcs_bucket_name";

/// Section lists and settings on top of a [`StateStore`].
#[derive(Debug, Clone)]
pub struct ResourceStore {
    /// Backing key/value store.
    state: Arc<dyn StateStore>,
}

impl ResourceStore {
    /// Creates a store over `state`.
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self { state }
    }

    /// Load the list for `section`.
    ///
    /// Falls back to the seed list when nothing is stored, when the stored
    /// text does not parse, or when the backing store cannot be read. A
    /// stored empty array is kept as an empty section.
    pub async fn load_section(&self, section: Section) -> Vec<Resource> {
        let key = section.storage_key();
        let raw = match self.state.load(key).await {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                debug!(section = %section, "No stored resources, using seed data");
                return seed_resources(section);
            }
            Err(e) => {
                warn!(section = %section, error = %e, "Failed to read stored resources, using seed data");
                return seed_resources(section);
            }
        };

        match serde_json::from_str::<Vec<Resource>>(&raw) {
            Ok(resources) => {
                debug!(section = %section, count = resources.len(), "Loaded stored resources");
                resources
            }
            Err(e) => {
                warn!(section = %section, error = %e, "Stored resources are corrupt, using seed data");
                seed_resources(section)
            }
        }
    }

    /// Persist the full list for `section`.
    pub async fn save_section(&self, section: Section, resources: &[Resource]) -> AppResult<()> {
        let raw = serde_json::to_string(resources)?;
        self.state.save(section.storage_key(), &raw).await?;
        debug!(section = %section, count = resources.len(), "Persisted resources");
        Ok(())
    }

    /// Stored theme, light when absent or unreadable.
    pub async fn load_theme(&self) -> Theme {
        match self.state.load(THEME_KEY).await {
            Ok(Some(raw)) => Theme::from_persisted(&raw),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read theme");
                Theme::default()
            }
        }
    }

    /// Persist the theme.
    pub async fn save_theme(&self, theme: Theme) -> AppResult<()> {
        self.state
            .save(THEME_KEY, &serde_json::to_string(&theme)?)
            .await
    }

    /// Stored bucket name, if one was configured.
    ///
    /// Accepts both a JSON string and bare text.
    pub async fn load_bucket_name(&self) -> Option<String> {
        let raw = match self.state.load(BUCKET_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read bucket name");
                return None;
            }
        };
        let name = serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string());
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Persist the bucket name. A blank name removes it.
    pub async fn save_bucket_name(&self, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return self.state.delete(BUCKET_KEY).await;
        }
        self.state
            .save(BUCKET_KEY, &serde_json::to_string(name)?)
            .await
    }
}
