//! Resource type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a resource is.
///
/// Serialized with the portal's Spanish labels; the English names are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// A folder that can parent other resources.
    #[serde(rename = "Carpeta", alias = "Folder")]
    Folder,
    /// An uploaded PDF.
    #[serde(rename = "PDF")]
    Pdf,
    /// An uploaded text document.
    #[serde(rename = "Documento", alias = "Document")]
    Document,
    /// An uploaded spreadsheet.
    #[serde(rename = "Hoja de cálculo", alias = "Spreadsheet")]
    Spreadsheet,
    /// An external link.
    #[serde(rename = "Enlace", alias = "Link")]
    Link,
}

impl ResourceType {
    /// All types in the order the resource form offers them.
    pub const ALL: [ResourceType; 5] = [
        Self::Folder,
        Self::Pdf,
        Self::Document,
        Self::Spreadsheet,
        Self::Link,
    ];

    /// The persisted label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "Carpeta",
            Self::Pdf => "PDF",
            Self::Document => "Documento",
            Self::Spreadsheet => "Hoja de cálculo",
            Self::Link => "Enlace",
        }
    }

    /// Whether this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Whether the resource content comes from an uploaded file.
    pub fn is_file_backed(&self) -> bool {
        matches!(self, Self::Pdf | Self::Document | Self::Spreadsheet)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(kind) = Self::ALL.iter().find(|k| k.label() == trimmed) {
            return Ok(*kind);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "folder" | "carpeta" => Ok(Self::Folder),
            "pdf" => Ok(Self::Pdf),
            "document" | "documento" | "doc" => Ok(Self::Document),
            "spreadsheet" | "hoja" | "sheet" => Ok(Self::Spreadsheet),
            "link" | "enlace" | "url" => Ok(Self::Link),
            other => Err(format!("Unknown resource type: {other}")),
        }
    }
}
