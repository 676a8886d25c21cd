//! Folder listings and breadcrumb trails over a flat section list.
//!
//! A section is stored as a flat list where each resource points at its
//! parent folder. Everything here is derived from that list on demand.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use recursos_entity::{Breadcrumb, Resource, ResourceId, Section};

/// What the user sees after entering a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderView {
    /// Direct children of the folder, in stored order.
    pub listing: Vec<Resource>,
    /// Trail from the section root down to the folder.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Enter `target` (`None` for the section root).
pub fn navigate(resources: &[Resource], target: Option<ResourceId>) -> FolderView {
    FolderView {
        listing: list_children(resources, target),
        breadcrumbs: build_breadcrumbs(resources, target),
    }
}

/// Resources whose parent is `target`, in stored order.
pub fn list_children(resources: &[Resource], target: Option<ResourceId>) -> Vec<Resource> {
    resources
        .iter()
        .filter(|r| r.parent_id == target)
        .cloned()
        .collect()
}

/// Walks parent links upward from `target` and returns the trail root-first.
///
/// The trail always starts with the synthetic root entry. A parent link
/// that points at a missing resource ends the walk there. A parent link
/// that leads back to an already visited resource also ends the walk, so
/// corrupted data cannot loop forever.
pub fn build_breadcrumbs(resources: &[Resource], target: Option<ResourceId>) -> Vec<Breadcrumb> {
    let mut by_id: HashMap<ResourceId, &Resource> = HashMap::with_capacity(resources.len());
    for resource in resources {
        by_id.entry(resource.id).or_insert(resource);
    }

    let mut trail = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = target;

    while let Some(id) = cursor {
        if !visited.insert(id) {
            warn!(folder_id = id, "Parent cycle detected while building breadcrumbs");
            break;
        }
        let Some(resource) = by_id.get(&id) else {
            break;
        };
        trail.push(Breadcrumb::from(*resource));
        cursor = resource.parent_id;
    }

    trail.push(Breadcrumb::root());
    trail.reverse();
    trail
}

/// Folders offered as destinations in the resource form.
///
/// When editing a folder, the folder itself and everything below it are
/// left out so the result can never introduce a cycle.
pub fn available_folders<'a>(
    resources: &'a [Resource],
    editing: Option<ResourceId>,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| r.is_folder())
        .filter(|r| match editing {
            Some(id) => !is_within(resources, r.id, id),
            None => true,
        })
        .collect()
}

/// Whether `candidate` is `ancestor` or sits somewhere below it.
pub fn is_within(resources: &[Resource], candidate: ResourceId, ancestor: ResourceId) -> bool {
    let mut visited = HashSet::new();
    let mut cursor = Some(candidate);
    while let Some(id) = cursor {
        if id == ancestor {
            return true;
        }
        if !visited.insert(id) {
            return false;
        }
        cursor = resources
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.parent_id);
    }
    false
}

/// Page title for the current trail.
pub fn page_title(section: Section, breadcrumbs: &[Breadcrumb]) -> String {
    match breadcrumbs.last() {
        Some(crumb) if !crumb.is_root() => crumb.name.clone(),
        _ => section.root_title().to_string(),
    }
}
