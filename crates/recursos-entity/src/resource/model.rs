//! Resource entity model.

use serde::{Deserialize, Serialize};

use super::kind::ResourceType;

/// Resource identifier, unique only within its section.
pub type ResourceId = i64;

/// A node in one section's resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Identifier, unique within the section.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Last modification, `YYYY-MM-DD HH:MM` local time.
    pub modified: String,
    /// Display name of whoever last modified it.
    pub modified_by: String,
    /// Requires a signed-in user to open.
    #[serde(default)]
    pub is_protected: bool,
    /// Link target or uploaded file URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Parent folder ID (`None` for the section root).
    #[serde(default)]
    pub parent_id: Option<ResourceId>,
}

impl Resource {
    /// Check if this resource is a folder.
    pub fn is_folder(&self) -> bool {
        self.resource_type.is_folder()
    }

    /// Check if this resource sits at the section root.
    pub fn is_root_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new resource.
///
/// `id`, `modified`, and `modified_by` are assigned by the mutator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    /// Display name.
    pub name: String,
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Requires a signed-in user to open.
    #[serde(default)]
    pub is_protected: bool,
    /// Link target or uploaded file URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Destination folder (`None` for the section root).
    #[serde(default)]
    pub parent_id: Option<ResourceId>,
}

/// Fields to merge over an existing resource.
///
/// `None` leaves the field as it is. For `url` and `parent_id`,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePatch {
    /// New display name.
    pub name: Option<String>,
    /// New type.
    pub resource_type: Option<ResourceType>,
    /// New protection flag.
    pub is_protected: Option<bool>,
    /// New URL.
    pub url: Option<Option<String>>,
    /// New parent folder.
    pub parent_id: Option<Option<ResourceId>>,
}

impl ResourcePatch {
    /// Shallow-merge the present fields over `resource`.
    pub fn apply_to(&self, resource: &mut Resource) {
        if let Some(name) = &self.name {
            resource.name = name.clone();
        }
        if let Some(kind) = self.resource_type {
            resource.resource_type = kind;
        }
        if let Some(protected) = self.is_protected {
            resource.is_protected = protected;
        }
        if let Some(url) = &self.url {
            resource.url = url.clone();
        }
        if let Some(parent) = self.parent_id {
            resource.parent_id = parent;
        }
    }
}

impl From<NewResource> for ResourcePatch {
    /// A full form submission overwrites every editable field.
    fn from(value: NewResource) -> Self {
        Self {
            name: Some(value.name),
            resource_type: Some(value.resource_type),
            is_protected: Some(value.is_protected),
            url: Some(value.url),
            parent_id: Some(value.parent_id),
        }
    }
}
