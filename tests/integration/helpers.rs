//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use recursos_core::config::AppConfig;
use recursos_core::traits::{StateStore, UploadFile, UploadGateway};
use recursos_entity::{Resource, Section, User};
use recursos_service::{SaveRequest, ViewController};
use recursos_storage::MemoryStateStore;
use recursos_storage::gateways::MemoryUploadGateway;

/// Test application context
pub struct TestApp {
    /// The controller under test
    pub controller: ViewController,
    /// Persisted state, shared with the controller
    pub state: MemoryStateStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Seed data, accepting upload gateway
    pub async fn new() -> Self {
        Self::build(MemoryStateStore::new(), Arc::new(MemoryUploadGateway::new())).await
    }

    /// Pre-populated persisted state
    pub async fn with_entries(entries: &[(&str, &str)]) -> Self {
        let state = MemoryStateStore::with_entries(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        Self::build(state, Arc::new(MemoryUploadGateway::new())).await
    }

    /// Custom upload gateway
    pub async fn with_gateway(gateway: Arc<dyn UploadGateway>) -> Self {
        Self::build(MemoryStateStore::new(), gateway).await
    }

    async fn build(state: MemoryStateStore, gateway: Arc<dyn UploadGateway>) -> Self {
        let config = AppConfig::default();
        let controller = ViewController::init(&config, Arc::new(state.clone()), gateway)
            .await
            .expect("Failed to init controller");
        Self {
            controller,
            state,
            config,
        }
    }

    /// Sign in a user with the given display name
    pub async fn sign_in_as(&self, name: &str) {
        self.controller.sign_in_user(user(name)).await;
    }

    /// Sign in and authorize storage uploads
    pub async fn sign_in_authorized(&self, name: &str) {
        self.sign_in_as(name).await;
        self.controller
            .authorize_storage("ya29.test-token")
            .await
            .expect("Failed to authorize storage");
    }

    /// Persisted list for a section, parsed
    pub async fn persisted(&self, section: Section) -> Option<Vec<Resource>> {
        let raw = self.state.load(section.storage_key()).await.ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Current listing of the active folder
    pub async fn listing(&self) -> Vec<Resource> {
        self.controller.snapshot().await.listing
    }

    /// Create a folder in the current folder
    pub async fn create_folder(&self, name: &str, parent: Option<i64>) -> Resource {
        let mut request = SaveRequest::create(name, recursos_entity::ResourceType::Folder);
        request.parent_id = parent;
        self.controller
            .save(request)
            .await
            .expect("Failed to create folder")
            .expect("Created folder missing")
    }
}

/// A user profile
pub fn user(name: &str) -> User {
    User {
        name: name.to_string(),
        email: format!("{}@mined.gob.sv", name.to_lowercase().replace(' ', ".")),
        picture: String::new(),
    }
}

/// Identity assertion carrying `name` and `email`
pub fn assertion(name: &str, email: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "name": name, "email": email }),
        &EncodingKey::from_secret(b"browser-issued"),
    )
    .expect("Failed to encode assertion")
}

/// A small PDF file
pub fn pdf(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        mime_type: Some("application/pdf".to_string()),
        data: Bytes::from_static(b"%PDF-1.7"),
    }
}
