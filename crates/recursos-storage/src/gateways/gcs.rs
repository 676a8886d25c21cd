//! Google Cloud Storage gateway: single-request media uploads by bucket name.

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use recursos_core::config::GcsConfig;
use recursos_core::error::{AppError, ErrorKind};
use recursos_core::result::AppResult;
use recursos_core::traits::{UploadFile, UploadGateway, UploadTarget};
use recursos_core::types::AccessToken;

use super::provider_message;

/// Characters left intact by URI component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a file name as a single URI component.
pub fn encode_object_name(name: &str) -> String {
    utf8_percent_encode(name, COMPONENT).to_string()
}

/// Google Cloud Storage upload gateway.
#[derive(Debug, Clone)]
pub struct GcsUploadGateway {
    client: reqwest::Client,
    base_url: String,
    public_base_url: String,
    /// Bucket used when the caller does not name one.
    default_bucket: Option<String>,
}

impl GcsUploadGateway {
    /// Create a new gateway from configuration.
    pub fn new(config: &GcsConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("recursos-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            default_bucket: config.bucket.clone().filter(|b| !b.trim().is_empty()),
        })
    }

    /// Pick the bucket for an upload.
    fn bucket<'a>(&'a self, target: &UploadTarget<'a>) -> AppResult<&'a str> {
        target
            .container
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .or(self.default_bucket.as_deref())
            .ok_or_else(|| {
                AppError::configuration(
                    "The Google Cloud Storage bucket name is not configured. Set it in settings.",
                )
            })
    }

    /// Media upload endpoint for an object.
    fn upload_url(&self, bucket: &str, encoded_name: &str) -> String {
        format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.base_url, bucket, encoded_name
        )
    }

    /// Public URL of an uploaded object.
    fn public_url(&self, bucket: &str, encoded_name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket, encoded_name)
    }
}

#[async_trait]
impl UploadGateway for GcsUploadGateway {
    fn provider_type(&self) -> &str {
        "gcs"
    }

    async fn upload(
        &self,
        token: Option<&AccessToken>,
        target: UploadTarget<'_>,
        file: UploadFile,
    ) -> AppResult<String> {
        let token = token.ok_or_else(|| {
            AppError::authorization("Google Cloud Storage authorization is required")
        })?;
        let bucket = self.bucket(&target)?;
        let encoded = encode_object_name(&file.name);
        let url = self.upload_url(bucket, &encoded);

        debug!(bucket, object = %encoded, bytes = file.data.len(), "Uploading to GCS");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.secret())
            .header(CONTENT_TYPE, file.content_type())
            .body(file.data)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Failed to reach Google Cloud Storage: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body, status.as_u16());
            tracing::warn!(bucket, status = status.as_u16(), %message, "GCS upload rejected");
            return Err(AppError::upload(format!("Error uploading file: {message}")));
        }

        Ok(self.public_url(bucket, &encoded))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn gateway(bucket: Option<&str>) -> GcsUploadGateway {
        GcsUploadGateway::new(&GcsConfig {
            bucket: bucket.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    fn file() -> UploadFile {
        UploadFile {
            name: "Informe final.pdf".into(),
            mime_type: Some("application/pdf".into()),
            data: Bytes::from_static(b"%PDF-1.7"),
        }
    }

    #[test]
    fn test_encode_object_name_matches_uri_component() {
        assert_eq!(encode_object_name("Informe final.pdf"), "Informe%20final.pdf");
        assert_eq!(encode_object_name("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_object_name("(v2)_ok!"), "(v2)_ok!");
        assert_eq!(encode_object_name("año.xlsx"), "a%C3%B1o.xlsx");
    }

    #[test]
    fn test_urls() {
        let gw = gateway(None);
        assert_eq!(
            gw.upload_url("mined-docs", "a%20b.pdf"),
            "https://storage.googleapis.com/upload/storage/v1/b/mined-docs/o?uploadType=media&name=a%20b.pdf"
        );
        assert_eq!(
            gw.public_url("mined-docs", "a%20b.pdf"),
            "https://storage.googleapis.com/mined-docs/a%20b.pdf"
        );
    }

    #[test]
    fn test_target_bucket_overrides_default() {
        let gw = gateway(Some("from-config"));
        let target = UploadTarget {
            destination: "monitoreo",
            container: Some("from-settings"),
        };
        assert_eq!(gw.bucket(&target).unwrap(), "from-settings");
        let target = UploadTarget {
            destination: "monitoreo",
            container: None,
        };
        assert_eq!(gw.bucket(&target).unwrap(), "from-config");
    }

    #[tokio::test]
    async fn test_missing_token_is_authorization_error() {
        let gw = gateway(Some("mined-docs"));
        let target = UploadTarget {
            destination: "monitoreo",
            container: None,
        };
        let err = gw.upload(None, target, file()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_missing_bucket_fails_before_request() {
        let gw = gateway(None);
        let token = AccessToken::new("ya29.token").unwrap();
        let target = UploadTarget {
            destination: "monitoreo",
            container: Some("  "),
        };
        let err = gw.upload(Some(&token), target, file()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
