//! Integration tests for resource creation, editing, deletion, and persistence.

mod helpers;

use std::sync::Arc;

use chrono::NaiveDateTime;
use recursos_core::config::AppConfig;
use recursos_core::error::ErrorKind;
use recursos_entity::{ResourceType, Section};
use recursos_service::{SaveRequest, ViewController};
use recursos_storage::FileStateStore;
use recursos_storage::gateways::MemoryUploadGateway;

#[tokio::test]
async fn test_create_then_lookup() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;

    let mut request = SaveRequest::create("Portal MINED", ResourceType::Link);
    request.url = Some("https://www.mined.gob.sv".into());
    request.is_protected = true;
    request.parent_id = Some(5);
    let created = app.controller.save(request).await.unwrap().unwrap();

    let found = app.controller.find(created.id).await.unwrap();
    assert_eq!(found.name, "Portal MINED");
    assert_eq!(found.resource_type, ResourceType::Link);
    assert_eq!(found.url.as_deref(), Some("https://www.mined.gob.sv"));
    assert!(found.is_protected);
    assert_eq!(found.parent_id, Some(5));
    assert_eq!(found.modified_by, "Ana");
    assert!(NaiveDateTime::parse_from_str(&found.modified, "%Y-%m-%d %H:%M").is_ok());

    let persisted = app.persisted(Section::CentrosEscolares).await.unwrap();
    assert!(persisted.iter().any(|r| r.id == created.id));
}

#[tokio::test]
async fn test_anonymous_create_uses_placeholder() {
    let app = helpers::TestApp::new().await;

    let created = app.create_folder("Actas", None).await;
    assert_eq!(created.modified_by, "Usuario");
    assert!(app.listing().await.iter().any(|r| r.id == created.id));
}

#[tokio::test]
async fn test_update_merges_and_restamps() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Roberto Díaz").await;

    let existing = app.controller.find(5).await.unwrap();
    let mut request = SaveRequest::edit(&existing);
    request.name = "Asignación de Recursos 2025".into();
    let updated = app.controller.save(request).await.unwrap().unwrap();

    assert_eq!(updated.id, 5);
    assert_eq!(updated.name, "Asignación de Recursos 2025");
    assert_eq!(updated.resource_type, ResourceType::Folder);
    assert_eq!(updated.modified_by, "Roberto Díaz");
    assert_ne!(updated.modified, existing.modified);
}

#[tokio::test]
async fn test_update_unknown_id_is_noop() {
    let app = helpers::TestApp::new().await;
    let before = app.controller.snapshot().await.listing;

    let mut request = SaveRequest::create("Fantasma", ResourceType::Folder);
    request.id = Some(424242);
    assert!(app.controller.save(request).await.unwrap().is_none());

    assert_eq!(app.controller.snapshot().await.listing, before);
    assert!(app.persisted(Section::CentrosEscolares).await.is_none());
}

#[tokio::test]
async fn test_delete_keeps_children() {
    let app = helpers::TestApp::new().await;

    let removed = app.controller.delete(1).await.unwrap().unwrap();
    assert_eq!(removed.name, "Documentación Oficial");

    let persisted = app.persisted(Section::CentrosEscolares).await.unwrap();
    assert_eq!(persisted.len(), 5);
    assert!(persisted.iter().all(|r| r.id != 1));
    let orphan = persisted.iter().find(|r| r.id == 6).unwrap();
    assert_eq!(orphan.parent_id, Some(1));

    assert!(app.controller.delete(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_validation_leaves_list_unchanged() {
    let app = helpers::TestApp::new().await;
    let before = app.listing().await;

    let blank = SaveRequest::create("  ", ResourceType::Folder);
    assert_eq!(
        app.controller.save(blank).await.unwrap_err().kind,
        ErrorKind::Validation
    );

    let link = SaveRequest::create("Sin URL", ResourceType::Link);
    assert_eq!(
        app.controller.save(link).await.unwrap_err().kind,
        ErrorKind::Validation
    );

    let pdf = SaveRequest::create("Sin archivo.pdf", ResourceType::Pdf);
    assert_eq!(
        app.controller.save(pdf).await.unwrap_err().kind,
        ErrorKind::Validation
    );

    let mut into_file = SaveRequest::create("Sub", ResourceType::Folder);
    into_file.parent_id = Some(2);
    assert_eq!(
        app.controller.save(into_file).await.unwrap_err().kind,
        ErrorKind::Validation
    );

    assert_eq!(app.listing().await, before);
    assert!(app.persisted(Section::CentrosEscolares).await.is_none());
}

#[tokio::test]
async fn test_corrupt_storage_falls_back_to_seed() {
    let app = helpers::TestApp::with_entries(&[("centros_resources", "not json at all")]).await;
    let names: Vec<_> = app.listing().await.into_iter().map(|r| r.name).collect();
    assert!(names.contains(&"Documentación Oficial".to_string()));
}

#[tokio::test]
async fn test_persist_then_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default();

    let first = ViewController::init(
        &config,
        Arc::new(FileStateStore::new(dir.path()).await.unwrap()),
        Arc::new(MemoryUploadGateway::new()),
    )
    .await
    .unwrap();
    let mut request = SaveRequest::create("Circulares", ResourceType::Folder);
    request.parent_id = Some(1);
    first.save(request).await.unwrap();
    first.delete(2).await.unwrap();
    let saved = {
        first.navigate(Some(1)).await;
        first.snapshot().await.listing
    };

    let second = ViewController::init(
        &config,
        Arc::new(FileStateStore::new(dir.path()).await.unwrap()),
        Arc::new(MemoryUploadGateway::new()),
    )
    .await
    .unwrap();
    second.navigate(Some(1)).await;
    assert_eq!(second.snapshot().await.listing, saved);
    assert!(second.find(2).await.is_none());
}

#[tokio::test]
async fn test_sections_are_independent() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;

    app.create_folder("Solo centros", None).await;
    assert!(app.persisted(Section::Monitoreo).await.is_none());
    assert!(app.persisted(Section::Supervision).await.is_none());
    assert!(app.persisted(Section::CentrosEscolares).await.is_some());
}
