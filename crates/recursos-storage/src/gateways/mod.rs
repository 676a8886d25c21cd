//! Upload gateway implementations.

#[cfg(feature = "drive")]
pub mod drive;
#[cfg(feature = "gcs")]
pub mod gcs;
pub mod memory;

#[cfg(feature = "drive")]
pub use drive::DriveUploadGateway;
#[cfg(feature = "gcs")]
pub use gcs::GcsUploadGateway;
pub use memory::MemoryUploadGateway;

use std::sync::Arc;

use recursos_core::config::{StorageConfig, UploadProvider};
use recursos_core::error::AppError;
use recursos_core::result::AppResult;
use recursos_core::traits::UploadGateway;

/// Build the upload gateway selected by configuration.
pub fn from_config(config: &StorageConfig) -> AppResult<Arc<dyn UploadGateway>> {
    let gateway: Arc<dyn UploadGateway> = match config.provider {
        #[cfg(feature = "gcs")]
        UploadProvider::Gcs => Arc::new(GcsUploadGateway::new(&config.gcs)?),
        #[cfg(feature = "drive")]
        UploadProvider::Drive => Arc::new(DriveUploadGateway::new(&config.drive)?),
        UploadProvider::Memory => Arc::new(MemoryUploadGateway::new()),
        #[allow(unreachable_patterns)]
        other => {
            return Err(AppError::configuration(format!(
                "Upload provider {other:?} is not compiled in"
            )));
        }
    };
    tracing::info!(provider = gateway.provider_type(), "Upload gateway ready");
    Ok(gateway)
}

/// Extract the human-readable message from a Google API error body.
///
/// Google APIs answer failures with `{"error": {"message": "..."}}`; any
/// other body falls back to the HTTP status text.
#[cfg_attr(not(any(feature = "gcs", feature = "drive")), allow(dead_code))]
pub(crate) fn provider_message(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {trimmed}")
            }
        })
}
