//! File-backed state store: one `<key>.json` document per key.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use recursos_core::error::{AppError, ErrorKind};
use recursos_core::result::AppResult;
use recursos_core::traits::StateStore;

/// State store writing each key to its own JSON file.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    /// Directory holding the documents.
    root: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `directory`, creating it if needed.
    pub async fn new(directory: impl AsRef<Path>) -> AppResult<Self> {
        let root = directory.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create state directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a key to its document path.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::validation(format!("Invalid state key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    fn store_type(&self) -> &str {
        "file"
    }

    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key)?;
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read state: {}", path.display()),
                e,
            )),
        }
    }

    async fn save(&self, key: &str, raw_json: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        let tmp = path.with_extension("json.tmp");

        // Readers only ever observe a complete document.
        fs::write(&tmp, raw_json.as_bytes()).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write state: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace state: {}", path.display()),
                e,
            )
        })?;

        debug!(key, bytes = raw_json.len(), "State saved");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
