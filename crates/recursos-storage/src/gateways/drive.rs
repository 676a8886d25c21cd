//! Google Drive gateway: per-section destination folders and multipart uploads.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use recursos_core::config::DriveConfig;
use recursos_core::error::{AppError, ErrorKind};
use recursos_core::result::AppResult;
use recursos_core::traits::{UploadFile, UploadGateway, UploadTarget};
use recursos_core::types::AccessToken;

use super::provider_message;

/// MIME type Drive uses for folders.
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Boundary separating the metadata and media parts of an upload.
const BOUNDARY: &str = "recursos_portal_part_314159265358979";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    web_view_link: Option<String>,
}

/// Google Drive upload gateway.
#[derive(Debug, Clone)]
pub struct DriveUploadGateway {
    client: reqwest::Client,
    base_url: String,
    root_folder_id: Option<String>,
    folder_names: HashMap<String, String>,
    /// Destination slug → resolved Drive folder ID.
    folder_ids: Arc<RwLock<HashMap<String, String>>>,
}

impl DriveUploadGateway {
    /// Create a new gateway from configuration.
    pub fn new(config: &DriveConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("recursos-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            root_folder_id: config.root_folder_id.clone().filter(|id| !id.is_empty()),
            folder_names: config.folder_names.clone(),
            folder_ids: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Drive folder name for a destination slug.
    fn folder_name(&self, destination: &str) -> String {
        self.folder_names
            .get(destination)
            .cloned()
            .unwrap_or_else(|| destination.to_string())
    }

    /// Search query matching the destination folder.
    fn folder_query(&self, name: &str) -> String {
        let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
        let mut query =
            format!("name = '{escaped}' and mimeType = '{FOLDER_MIME}' and trashed = false");
        if let Some(root) = &self.root_folder_id {
            query.push_str(&format!(" and '{root}' in parents"));
        }
        query
    }

    /// Look up the destination folder, creating it when missing.
    async fn resolve_folder(&self, token: &AccessToken, destination: &str) -> AppResult<String> {
        if let Some(id) = self.folder_ids.read().await.get(destination) {
            return Ok(id.clone());
        }

        let name = self.folder_name(destination);
        let id = match self.find_folder(token, &name).await? {
            Some(id) => id,
            None => self.create_folder(token, &name).await?,
        };

        self.folder_ids
            .write()
            .await
            .insert(destination.to_string(), id.clone());
        Ok(id)
    }

    async fn find_folder(&self, token: &AccessToken, name: &str) -> AppResult<Option<String>> {
        let url = Url::parse_with_params(
            &format!("{}/drive/v3/files", self.base_url),
            &[
                ("q", self.folder_query(name).as_str()),
                ("fields", "files(id,name)"),
                ("spaces", "drive"),
            ],
        )
        .map_err(|e| AppError::with_source(ErrorKind::Configuration, "Invalid Drive URL", e))?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(unreachable_drive)?;
        let list: FileList = read_json(response, "Folder lookup failed").await?;

        debug!(folder = name, found = !list.files.is_empty(), "Drive folder lookup");
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    async fn create_folder(&self, token: &AccessToken, name: &str) -> AppResult<String> {
        let mut metadata = serde_json::json!({ "name": name, "mimeType": FOLDER_MIME });
        if let Some(root) = &self.root_folder_id {
            metadata["parents"] = serde_json::json!([root]);
        }

        let response = self
            .client
            .post(format!("{}/drive/v3/files?fields=id", self.base_url))
            .bearer_auth(token.secret())
            .json(&metadata)
            .send()
            .await
            .map_err(unreachable_drive)?;
        let created: DriveFile = read_json(response, "Folder creation failed").await?;

        info!(folder = name, folder_id = %created.id, "Drive destination folder created");
        Ok(created.id)
    }
}

/// Body of a `multipart/related` upload: JSON metadata then the media.
pub fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    content_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());
    body
}

fn unreachable_drive(e: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Failed to reach Google Drive: {e}"),
        e,
    )
}

/// Decode a successful JSON response, or turn a failure into an upload error.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(unreachable_drive)?;
    if !status.is_success() {
        let message = provider_message(&body, status.as_u16());
        tracing::warn!(status = status.as_u16(), %message, "{context}");
        return Err(AppError::upload(format!("{context}: {message}")));
    }
    serde_json::from_str(&body).map_err(AppError::from)
}

#[async_trait]
impl UploadGateway for DriveUploadGateway {
    fn provider_type(&self) -> &str {
        "drive"
    }

    async fn upload(
        &self,
        token: Option<&AccessToken>,
        target: UploadTarget<'_>,
        file: UploadFile,
    ) -> AppResult<String> {
        let token =
            token.ok_or_else(|| AppError::authorization("Google Drive authorization is required"))?;
        let folder_id = self.resolve_folder(token, target.destination).await?;

        let metadata = serde_json::json!({ "name": file.name, "parents": [folder_id] });
        let body = multipart_related_body(BOUNDARY, &metadata, file.content_type(), &file.data);

        debug!(
            destination = target.destination,
            bytes = file.data.len(),
            "Uploading to Drive"
        );

        let response = self
            .client
            .post(format!(
                "{}/upload/drive/v3/files?uploadType=multipart&fields=id,webViewLink",
                self.base_url
            ))
            .bearer_auth(token.secret())
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={BOUNDARY}"),
            )
            .body(body)
            .send()
            .await
            .map_err(unreachable_drive)?;
        let uploaded: DriveFile = read_json(response, "Error uploading file").await?;

        Ok(uploaded
            .web_view_link
            .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", uploaded.id)))
    }
}
