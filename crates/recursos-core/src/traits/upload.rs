//! Upload gateway trait for the file-backed resource types.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::AccessToken;

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name.
    pub name: String,
    /// MIME type, if the caller knows it.
    pub mime_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

impl UploadFile {
    /// Content type sent to the provider.
    pub fn content_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("application/octet-stream")
    }
}

/// Where an upload should land.
#[derive(Debug, Clone, Copy)]
pub struct UploadTarget<'a> {
    /// Section slug the resource belongs to.
    pub destination: &'a str,
    /// Named storage container (bucket) chosen by the user, if any.
    pub container: Option<&'a str>,
}

/// Trait for the services that store uploaded files and hand back a URL.
///
/// Implementations exist for Google Cloud Storage, Google Drive, and an
/// in-process store. The core never sees provider request shapes.
#[async_trait]
pub trait UploadGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "gcs", "drive").
    fn provider_type(&self) -> &str;

    /// Store `file` and return its durable URL.
    ///
    /// Fails with an authorization error when `token` is `None` and with an
    /// upload error when the provider rejects the request.
    async fn upload(
        &self,
        token: Option<&AccessToken>,
        target: UploadTarget<'_>,
        file: UploadFile,
    ) -> AppResult<String>;
}
