//! In-process upload gateway.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use recursos_core::error::AppError;
use recursos_core::result::AppResult;
use recursos_core::traits::{UploadFile, UploadGateway, UploadTarget};
use recursos_core::types::AccessToken;

/// Gateway keeping uploaded bytes in memory.
///
/// Returns `memory://<destination>/<name>` URLs. A gateway built with
/// [`MemoryUploadGateway::rejecting`] refuses every upload with the given
/// provider message.
#[derive(Debug, Clone, Default)]
pub struct MemoryUploadGateway {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
    rejection: Option<String>,
}

impl MemoryUploadGateway {
    /// Create an accepting gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway that rejects every upload with `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            objects: Arc::default(),
            rejection: Some(message.into()),
        }
    }

    /// Stored object URLs.
    pub async fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.objects.read().await.keys().cloned().collect();
        urls.sort();
        urls
    }

    /// Bytes stored under `url`.
    pub async fn get(&self, url: &str) -> Option<Bytes> {
        self.objects.read().await.get(url).cloned()
    }
}

#[async_trait]
impl UploadGateway for MemoryUploadGateway {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn upload(
        &self,
        token: Option<&AccessToken>,
        target: UploadTarget<'_>,
        file: UploadFile,
    ) -> AppResult<String> {
        if token.is_none() {
            return Err(AppError::authorization("Storage authorization is required"));
        }
        if let Some(message) = &self.rejection {
            return Err(AppError::upload(format!("Error uploading file: {message}")));
        }
        let url = format!("memory://{}/{}", target.destination, file.name);
        self.objects.write().await.insert(url.clone(), file.data);
        Ok(url)
    }
}
