//! Integration tests for section access, sign-in, uploads, and settings.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use recursos_core::error::{AppError, ErrorKind};
use recursos_core::result::AppResult;
use recursos_core::traits::{StateStore, UploadFile, UploadGateway, UploadTarget};
use recursos_core::types::AccessToken;
use recursos_entity::{ResourceType, Section, Theme};
use recursos_service::{SaveRequest, SectionChange};
use recursos_storage::gateways::MemoryUploadGateway;

/// Gateway that holds every upload until released.
#[derive(Debug, Default)]
struct HeldGateway {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl UploadGateway for HeldGateway {
    fn provider_type(&self) -> &str {
        "held"
    }

    async fn upload(
        &self,
        token: Option<&AccessToken>,
        target: UploadTarget<'_>,
        file: UploadFile,
    ) -> AppResult<String> {
        if token.is_none() {
            return Err(AppError::authorization("missing token"));
        }
        self.started.notify_one();
        self.release.notified().await;
        Ok(format!("held://{}/{}", target.destination, file.name))
    }
}

fn pdf_request(name: &str) -> SaveRequest {
    let mut request = SaveRequest::create(name, ResourceType::Pdf);
    request.file = Some(helpers::pdf(name));
    request
}

#[tokio::test]
async fn test_protected_section_deferred_until_sign_in() {
    let app = helpers::TestApp::new().await;

    let change = app.controller.select_section(Section::Monitoreo).await;
    assert_eq!(change, SectionChange::LoginRequired(Section::Monitoreo));
    let view = app.controller.snapshot().await;
    assert_eq!(view.section, Section::CentrosEscolares);
    assert!(view.login_prompt);
    assert!(!view.can_add_resources);

    let sign_in = app
        .controller
        .sign_in(&helpers::assertion("Ana Pérez", "ana@mined.gob.sv"))
        .await
        .unwrap();
    assert_eq!(sign_in.user.name, "Ana Pérez");
    assert_eq!(sign_in.entered, Some(Section::Monitoreo));

    let view = app.controller.snapshot().await;
    assert_eq!(view.section, Section::Monitoreo);
    assert_eq!(view.title, "Recursos de Monitoreo");
    assert!(view.can_add_resources);
    assert!(!view.login_prompt);
}

#[tokio::test]
async fn test_invalid_assertion_rejected() {
    let app = helpers::TestApp::new().await;
    let err = app.controller.sign_in("definitely.not.jwt").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(app.controller.snapshot().await.user.is_none());
}

#[tokio::test]
async fn test_sign_out_leaves_protected_section() {
    let app = helpers::TestApp::new().await;
    app.sign_in_authorized("Laura").await;
    app.controller.select_section(Section::Supervision).await;

    assert_eq!(
        app.controller.sign_out().await,
        Some(Section::CentrosEscolares)
    );
    let view = app.controller.snapshot().await;
    assert_eq!(view.section, Section::CentrosEscolares);
    assert!(view.user.is_none());
    assert!(!view.storage_authorized);
}

#[tokio::test]
async fn test_storage_authorization_needs_user() {
    let app = helpers::TestApp::new().await;
    assert!(app.controller.authorize_storage("ya29.token").await.is_err());
    assert!(!app.controller.is_authorized().await);

    app.sign_in_as("Ana").await;
    assert!(app.controller.authorize_storage("  ").await.is_err());
    app.controller.authorize_storage("ya29.token").await.unwrap();
    assert!(app.controller.is_authorized().await);
}

#[tokio::test]
async fn test_upload_requires_authorization() {
    let gateway = Arc::new(MemoryUploadGateway::new());
    let app = helpers::TestApp::with_gateway(gateway.clone()).await;
    app.sign_in_as("Ana").await;
    let before = app.listing().await;

    let err = app
        .controller
        .save(pdf_request("Acta.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(err.needs_authorization());

    assert_eq!(app.listing().await, before);
    assert!(gateway.urls().await.is_empty());
    assert!(app.persisted(Section::CentrosEscolares).await.is_none());
}

#[tokio::test]
async fn test_upload_sets_resource_url() {
    let gateway = Arc::new(MemoryUploadGateway::new());
    let app = helpers::TestApp::with_gateway(gateway.clone()).await;
    app.sign_in_authorized("Ana").await;

    let saved = app
        .controller
        .save(pdf_request("Acta.pdf"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        saved.url.as_deref(),
        Some("memory://centros-escolares/Acta.pdf")
    );
    assert!(gateway.get("memory://centros-escolares/Acta.pdf").await.is_some());

    // Editing without a new file keeps the uploaded URL.
    let mut edit = SaveRequest::edit(&saved);
    edit.name = "Acta final.pdf".into();
    let edited = app.controller.save(edit).await.unwrap().unwrap();
    assert_eq!(edited.url, saved.url);
    assert_eq!(gateway.urls().await.len(), 1);
}

#[tokio::test]
async fn test_rejected_upload_aborts_save() {
    let app = helpers::TestApp::with_gateway(Arc::new(MemoryUploadGateway::rejecting(
        "The specified bucket does not exist.",
    )))
    .await;
    app.sign_in_authorized("Ana").await;
    let before = app.listing().await;

    let err = app
        .controller
        .save(pdf_request("Acta.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Upload);
    assert!(err.message.contains("bucket does not exist"));
    assert_eq!(app.listing().await, before);
    assert!(!app.controller.is_saving(Section::CentrosEscolares));

    // The in-flight mark was cleared, so a non-upload save goes through.
    app.create_folder("Actas", None).await;
}

#[tokio::test]
async fn test_second_save_while_uploading_conflicts() {
    let gateway = Arc::new(HeldGateway::default());
    let app = helpers::TestApp::with_gateway(gateway.clone()).await;
    app.sign_in_authorized("Ana").await;

    let controller = app.controller.clone();
    let first = tokio::spawn(async move { controller.save(pdf_request("Uno.pdf")).await });

    gateway.started.notified().await;
    assert!(app.controller.is_saving(Section::CentrosEscolares));

    let err = app
        .controller
        .save(pdf_request("Dos.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    gateway.release.notify_one();
    let saved = first.await.unwrap().unwrap().unwrap();
    assert_eq!(saved.url.as_deref(), Some("held://centros-escolares/Uno.pdf"));
    assert!(!app.controller.is_saving(Section::CentrosEscolares));

    let names: Vec<_> = app.listing().await.into_iter().map(|r| r.name).collect();
    assert!(names.contains(&"Uno.pdf".to_string()));
    assert!(!names.contains(&"Dos.pdf".to_string()));
}

#[tokio::test]
async fn test_save_targets_section_active_at_submission() {
    let gateway = Arc::new(HeldGateway::default());
    let app = helpers::TestApp::with_gateway(gateway.clone()).await;
    app.sign_in_authorized("Ana").await;

    let controller = app.controller.clone();
    let first = tokio::spawn(async move { controller.save(pdf_request("Informe.pdf")).await });
    gateway.started.notified().await;

    app.controller.select_section(Section::Monitoreo).await;
    gateway.release.notify_one();
    first.await.unwrap().unwrap();

    let centros = app.persisted(Section::CentrosEscolares).await.unwrap();
    assert!(centros.iter().any(|r| r.name == "Informe.pdf"));
    assert!(app.persisted(Section::Monitoreo).await.is_none());
}

#[tokio::test]
async fn test_theme_and_bucket_persist() {
    let app = helpers::TestApp::new().await;
    assert_eq!(app.controller.snapshot().await.theme, Theme::Light);

    assert_eq!(app.controller.toggle_theme().await.unwrap(), Theme::Dark);
    assert_eq!(
        app.state.load("theme").await.unwrap().as_deref(),
        Some("\"dark\"")
    );

    app.controller.set_bucket_name(" recursos-mined ").await.unwrap();
    assert_eq!(
        app.controller.snapshot().await.bucket_name.as_deref(),
        Some("recursos-mined")
    );
    assert!(app.state.load("gcs_bucket_name").await.unwrap().is_some());
}

#[tokio::test]
async fn test_settings_restored_on_init() {
    let app = helpers::TestApp::with_entries(&[
        ("theme", "dark"),
        ("gcs_bucket_name", "\"recursos-mined\""),
    ])
    .await;
    let view = app.controller.snapshot().await;
    assert_eq!(view.theme, Theme::Dark);
    assert_eq!(view.bucket_name.as_deref(), Some("recursos-mined"));
}
