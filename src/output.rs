//! Table and JSON output for shell commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use recursos_entity::{Breadcrumb, Resource};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Listing row
#[derive(Debug, Serialize, Tabled)]
pub struct ResourceRow {
    /// Resource ID
    #[tabled(rename = "ID")]
    pub id: i64,
    /// Name
    #[tabled(rename = "Nombre")]
    pub name: String,
    /// Type label
    #[tabled(rename = "Tipo")]
    pub kind: String,
    /// Last modification
    #[tabled(rename = "Modificado")]
    pub modified: String,
    /// Last modifier
    #[tabled(rename = "Por")]
    pub modified_by: String,
    /// Lock marker
    #[tabled(rename = "Protegido")]
    pub protected: String,
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name.clone(),
            kind: resource.resource_type.label().to_string(),
            modified: resource.modified.clone(),
            modified_by: resource.modified_by.clone(),
            protected: if resource.is_protected { "sí" } else { "" }.to_string(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("(vacío)");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a serializable value as JSON, or its debug form for tables
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Trail rendered as `Inicio / A / B`
pub fn trail(breadcrumbs: &[Breadcrumb]) -> String {
    breadcrumbs
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
