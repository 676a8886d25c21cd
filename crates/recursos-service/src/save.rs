//! Resource form submissions.

use recursos_core::error::AppError;
use recursos_core::result::AppResult;
use recursos_core::traits::UploadFile;
use recursos_entity::{NewResource, Resource, ResourceId, ResourceType};

use crate::navigator::is_within;

/// A submitted resource form.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    /// Resource being edited; `None` creates a new one.
    pub id: Option<ResourceId>,
    /// Display name.
    pub name: String,
    /// Resource type.
    pub resource_type: ResourceType,
    /// Requires a signed-in user to open.
    pub is_protected: bool,
    /// Link target, used only for links.
    pub url: Option<String>,
    /// Destination folder.
    pub parent_id: Option<ResourceId>,
    /// File chosen for upload.
    pub file: Option<UploadFile>,
}

impl SaveRequest {
    /// A creation request for `name` of type `resource_type` at the root.
    pub fn create(name: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            id: None,
            name: name.into(),
            resource_type,
            is_protected: false,
            url: None,
            parent_id: None,
            file: None,
        }
    }

    /// A request prefilled from an existing resource, as the edit form is.
    pub fn edit(resource: &Resource) -> Self {
        Self {
            id: Some(resource.id),
            name: resource.name.clone(),
            resource_type: resource.resource_type,
            is_protected: resource.is_protected,
            url: resource.url.clone(),
            parent_id: resource.parent_id,
            file: None,
        }
    }
}

/// Where the saved resource's URL comes from.
#[derive(Debug, Clone)]
pub enum UrlSource {
    /// Known without contacting storage.
    Ready(Option<String>),
    /// Produced by uploading this file.
    Upload(UploadFile),
}

/// A validated request, ready to apply once its URL is known.
#[derive(Debug, Clone)]
pub struct SavePlan {
    /// Resource being edited; `None` creates a new one.
    pub id: Option<ResourceId>,
    /// Form fields with the URL still unresolved.
    pub fields: NewResource,
    /// URL source.
    pub url: UrlSource,
}

impl SavePlan {
    /// Whether applying the plan needs storage authorization.
    pub fn needs_upload(&self) -> bool {
        matches!(self.url, UrlSource::Upload(_))
    }

    /// Final form fields once the URL is known.
    pub fn into_fields(self, url: Option<String>) -> (Option<ResourceId>, NewResource) {
        let mut fields = self.fields;
        fields.url = url;
        (self.id, fields)
    }
}

/// Validate a form submission against the section it targets.
///
/// `existing` is the resource being edited, looked up by the caller.
pub fn plan(
    request: SaveRequest,
    resources: &[Resource],
    existing: Option<&Resource>,
) -> AppResult<SavePlan> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Resource name cannot be empty"));
    }

    let moved = request.parent_id != existing.and_then(|r| r.parent_id);
    if let Some(parent) = request.parent_id
        && moved
    {
        let is_folder = resources.iter().any(|r| r.id == parent && r.is_folder());
        if !is_folder {
            return Err(AppError::validation(format!(
                "Destination {parent} is not a folder in this section"
            )));
        }
        if let Some(id) = request.id
            && is_within(resources, parent, id)
        {
            return Err(AppError::validation(
                "Cannot move a folder into itself or one of its descendants",
            ));
        }
    }

    let url = match request.resource_type {
        ResourceType::Link => {
            let link = request
                .url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .ok_or_else(|| AppError::validation("A link resource needs a URL"))?;
            UrlSource::Ready(Some(link.to_string()))
        }
        kind if kind.is_file_backed() => match request.file {
            Some(file) => UrlSource::Upload(file),
            None => {
                let previous = existing.and_then(|r| r.url.clone());
                if previous.is_none() {
                    return Err(AppError::validation(format!(
                        "A {} resource needs a file to upload",
                        kind.label()
                    )));
                }
                UrlSource::Ready(previous)
            }
        },
        _ => UrlSource::Ready(existing.and_then(|r| r.url.clone())),
    };

    Ok(SavePlan {
        id: request.id,
        fields: NewResource {
            name: name.to_string(),
            resource_type: request.resource_type,
            is_protected: request.is_protected,
            url: None,
            parent_id: request.parent_id,
        },
        url,
    })
}
