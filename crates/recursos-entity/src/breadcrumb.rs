//! Breadcrumb trail entries.

use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceId};

/// Label of the synthetic entry that starts every trail.
pub const ROOT_LABEL: &str = "Inicio";

/// One step of the ancestor path shown above a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID, `None` for the section root.
    pub id: Option<ResourceId>,
    /// Display name.
    pub name: String,
}

impl Breadcrumb {
    /// The synthetic root entry.
    pub fn root() -> Self {
        Self {
            id: None,
            name: ROOT_LABEL.to_string(),
        }
    }

    /// Whether this is the synthetic root entry.
    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&Resource> for Breadcrumb {
    fn from(resource: &Resource) -> Self {
        Self {
            id: Some(resource.id),
            name: resource.name.clone(),
        }
    }
}
