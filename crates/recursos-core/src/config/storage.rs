//! Upload gateway configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which backing provider receives uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadProvider {
    /// Google Cloud Storage, objects addressed by bucket name.
    #[default]
    Gcs,
    /// Google Drive, one destination folder per section.
    Drive,
    /// In-process gateway (tests, offline demos).
    Memory,
}

/// Top-level upload configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected provider.
    #[serde(default)]
    pub provider: UploadProvider,
    /// Google Cloud Storage settings.
    #[serde(default)]
    pub gcs: GcsConfig,
    /// Google Drive settings.
    #[serde(default)]
    pub drive: DriveConfig,
}

/// Google Cloud Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Bucket used until the user saves one in settings.
    #[serde(default)]
    pub bucket: Option<String>,
    /// API base URL.
    #[serde(default = "default_gcs_base_url")]
    pub base_url: String,
    /// Base URL of the public object links handed back to callers.
    #[serde(default = "default_gcs_public_url")]
    pub public_base_url: String,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            base_url: default_gcs_base_url(),
            public_base_url: default_gcs_public_url(),
        }
    }
}

/// Google Drive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// API base URL (both metadata and upload endpoints live under it).
    #[serde(default = "default_drive_base_url")]
    pub base_url: String,
    /// Optional parent folder for the per-section destination folders.
    #[serde(default)]
    pub root_folder_id: Option<String>,
    /// Destination folder name per section slug.
    #[serde(default = "default_folder_names")]
    pub folder_names: HashMap<String, String>,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_url: default_drive_base_url(),
            root_folder_id: None,
            folder_names: default_folder_names(),
        }
    }
}

fn default_gcs_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_gcs_public_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_drive_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_folder_names() -> HashMap<String, String> {
    HashMap::from([
        ("monitoreo".to_string(), "Monitoreo".to_string()),
        ("supervision".to_string(), "Supervisión".to_string()),
        ("centros-escolares".to_string(), "Centros Escolares".to_string()),
    ])
}
