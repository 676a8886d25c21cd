//! Default resource lists used when nothing has been persisted yet.

use recursos_entity::{Resource, ResourceId, ResourceType, Section};

fn seed(
    id: ResourceId,
    name: &str,
    resource_type: ResourceType,
    modified: &str,
    modified_by: &str,
    is_protected: bool,
    parent_id: Option<ResourceId>,
) -> Resource {
    Resource {
        id,
        name: name.to_string(),
        resource_type,
        modified: modified.to_string(),
        modified_by: modified_by.to_string(),
        is_protected,
        url: None,
        parent_id,
    }
}

/// The seed list for `section`.
pub fn seed_resources(section: Section) -> Vec<Resource> {
    use ResourceType::*;

    match section {
        Section::Monitoreo => vec![
            seed(1, "Reportes de Sistema", Folder, "2024-07-28 10:00", "Admin", false, None),
            seed(2, "Log de Actividad Q2.pdf", Pdf, "2024-07-27 15:30", "Sistema", true, None),
            seed(3, "Análisis de Uptime.xlsx", Spreadsheet, "2024-07-27 09:15", "Ana Pérez", false, None),
            seed(4, "Protocolos de Seguridad.docx", Document, "2024-07-25 12:00", "Carlos Gómez", true, Some(1)),
            seed(5, "Alertas Críticas Resueltas", Folder, "2024-07-24 18:45", "Admin", true, None),
            seed(6, "Métricas de Performance.xlsx", Spreadsheet, "2024-07-23 11:00", "Ana Pérez", false, Some(5)),
        ],
        Section::Supervision => {
            let mut plan = seed(
                3,
                "Plan de Trabajo Semanal (Online)",
                Link,
                "2024-07-29 10:00",
                "Laura Martínez",
                false,
                None,
            );
            plan.url = Some("https://docs.google.com/spreadsheets/d/1a2b3c4d5e6f7g8h9i0j".to_string());
            vec![
                seed(1, "Auditorías", Folder, "2024-07-28 11:20", "Laura Martínez", true, None),
                seed(2, "Checklist de Revisión v3.pdf", Pdf, "2024-07-26 14:00", "Javier Solís", false, Some(1)),
                plan,
                seed(4, "Plantillas de Reportes", Folder, "2024-07-24 08:30", "Admin", false, None),
                seed(5, "Guía de Buenas Prácticas.docx", Document, "2024-07-22 19:05", "Javier Solís", false, Some(4)),
            ]
        }
        Section::CentrosEscolares => vec![
            seed(1, "Documentación Oficial", Folder, "2024-07-29 09:00", "Sofía Castro", false, None),
            seed(2, "Calendario Escolar 2024-2025.pdf", Pdf, "2024-07-28 13:45", "Admin", false, None),
            seed(3, "Matrícula Estudiantil General.xlsx", Spreadsheet, "2024-07-27 11:10", "Roberto Díaz", true, None),
            seed(4, "Directorio de Personal Docente.docx", Document, "2024-07-26 17:00", "Sofía Castro", true, None),
            seed(5, "Asignación de Recursos", Folder, "2024-07-25 10:00", "Admin", false, None),
            seed(6, "Formularios de Inscripción.pdf", Pdf, "2024-07-24 15:20", "Roberto Díaz", false, Some(1)),
        ],
    }
}
