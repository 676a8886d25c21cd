//! Integration tests for folder navigation and breadcrumbs.

mod helpers;

use recursos_entity::Section;
use recursos_service::OpenOutcome;

fn names(crumbs: &[recursos_entity::Breadcrumb]) -> Vec<&str> {
    crumbs.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn test_every_section_starts_at_root() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;

    for section in Section::ALL {
        app.controller.select_section(section).await;
        let view = app.controller.snapshot().await;
        assert_eq!(view.section, section);
        assert_eq!(names(&view.breadcrumbs), vec!["Inicio"]);
        assert_eq!(view.title, section.root_title());
        assert!(view.listing.iter().all(|r| r.parent_id.is_none()));
    }
}

#[tokio::test]
async fn test_enter_seed_folder() {
    let app = helpers::TestApp::new().await;

    let view = app.controller.navigate(Some(1)).await;
    assert_eq!(view.listing.len(), 1);
    assert!(view.listing.iter().all(|r| r.parent_id == Some(1)));
    assert_eq!(view.listing[0].name, "Formularios de Inscripción.pdf");
    assert_eq!(names(&view.breadcrumbs), vec!["Inicio", "Documentación Oficial"]);

    let snapshot = app.controller.snapshot().await;
    assert_eq!(snapshot.title, "Documentación Oficial");
    assert_eq!(snapshot.current_folder, Some(1));
}

#[tokio::test]
async fn test_nested_chain() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;

    let a = app.create_folder("A", None).await;
    let b = app.create_folder("B", Some(a.id)).await;

    let view = app.controller.navigate(Some(b.id)).await;
    assert_eq!(names(&view.breadcrumbs), vec!["Inicio", "A", "B"]);
    assert_eq!(view.breadcrumbs[1].id, Some(a.id));

    let root = app.controller.navigate(None).await;
    assert_eq!(names(&root.breadcrumbs), vec!["Inicio"]);
}

#[tokio::test]
async fn test_cyclic_stored_data_terminates() {
    let cyclic = r#"[
        {"id":1,"name":"A","type":"Carpeta","modified":"2024-07-28 10:00","modifiedBy":"Admin","parentId":2},
        {"id":2,"name":"B","type":"Carpeta","modified":"2024-07-28 10:00","modifiedBy":"Admin","parentId":1}
    ]"#;
    let app = helpers::TestApp::with_entries(&[("centros_resources", cyclic)]).await;

    assert!(app.listing().await.is_empty());
    let view = app.controller.navigate(Some(1)).await;
    assert_eq!(names(&view.breadcrumbs), vec!["Inicio", "B", "A"]);
    assert_eq!(view.listing.len(), 1);
}

#[tokio::test]
async fn test_navigation_survives_section_switch() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;

    app.controller.navigate(Some(5)).await;
    app.controller.select_section(Section::Monitoreo).await;
    app.controller.navigate(Some(1)).await;

    app.controller.select_section(Section::CentrosEscolares).await;
    let view = app.controller.snapshot().await;
    assert_eq!(view.current_folder, Some(5));
    assert_eq!(view.title, "Asignación de Recursos");

    app.controller.select_section(Section::Monitoreo).await;
    assert_eq!(app.controller.snapshot().await.title, "Reportes de Sistema");
}

#[tokio::test]
async fn test_open_outcomes() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;
    app.controller.select_section(Section::Supervision).await;

    match app.controller.open(3).await.unwrap() {
        OpenOutcome::External(url) => assert!(url.starts_with("https://docs.google.com/")),
        other => panic!("expected external link, got {other:?}"),
    }

    match app.controller.open(1).await.unwrap() {
        OpenOutcome::Entered(view) => {
            assert_eq!(names(&view.breadcrumbs), vec!["Inicio", "Auditorías"]);
        }
        other => panic!("expected folder entry, got {other:?}"),
    }

    assert!(matches!(
        app.controller.open(2).await.unwrap(),
        OpenOutcome::NoLink(_)
    ));
    assert!(app.controller.open(999).await.is_err());
}

#[tokio::test]
async fn test_protected_resource_needs_sign_in() {
    let app = helpers::TestApp::new().await;

    assert_eq!(
        app.controller.open(3).await.unwrap(),
        OpenOutcome::LoginRequired
    );
    assert!(app.controller.snapshot().await.login_prompt);
}

#[tokio::test]
async fn test_deleted_current_folder_falls_back_to_root_title() {
    let app = helpers::TestApp::new().await;
    app.sign_in_as("Ana").await;

    app.controller.navigate(Some(1)).await;
    app.controller.delete(1).await.unwrap();

    let view = app.controller.snapshot().await;
    assert_eq!(names(&view.breadcrumbs), vec!["Inicio"]);
    assert_eq!(view.title, "Recursos de Centros Escolares");
    assert_eq!(view.listing.len(), 1);
}
