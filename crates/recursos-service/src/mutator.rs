//! Create, update, and delete over a section list.
//!
//! Every operation is pure: it takes the current list and returns the
//! next one. The caller decides when the result is persisted and swapped
//! in, so a failed write never leaves a half-applied list behind.

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use recursos_entity::{NewResource, Resource, ResourceId, ResourcePatch, User};

/// Timestamp layout written into `modified`.
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Who changed a resource, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// `YYYY-MM-DD HH:MM`, local time.
    pub modified: String,
    /// Display name of the acting user.
    pub modified_by: String,
    /// Same instant in Unix milliseconds, used to derive new IDs.
    pub issued_at_ms: i64,
}

impl Stamp {
    /// Stamp for `at`.
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>, modified_by: impl Into<String>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            modified: at.format(MODIFIED_FORMAT).to_string(),
            modified_by: modified_by.into(),
            issued_at_ms: at.timestamp_millis(),
        }
    }
}

/// Applies mutations to section lists.
#[derive(Debug, Clone)]
pub struct ResourceMutator {
    /// Name stamped when nobody is signed in.
    default_user_name: String,
}

/// Result of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The list to persist and swap in.
    pub resources: Vec<Resource>,
    /// The created, updated, or removed resource.
    pub affected: Resource,
}

impl ResourceMutator {
    /// Creates a mutator that stamps `default_user_name` for anonymous edits.
    pub fn new(default_user_name: impl Into<String>) -> Self {
        Self {
            default_user_name: default_user_name.into(),
        }
    }

    /// Stamp for the current local time and acting user.
    pub fn stamp(&self, user: Option<&User>) -> Stamp {
        let name = user
            .map(|u| u.name.clone())
            .unwrap_or_else(|| self.default_user_name.clone());
        Stamp::at(&Local::now(), name)
    }

    /// Append a new resource.
    ///
    /// The ID is the stamp's millisecond clock, bumped past the current
    /// maximum so two creations in the same millisecond stay distinct.
    pub fn create(&self, resources: &[Resource], new: NewResource, stamp: &Stamp) -> Mutation {
        let id = next_id(resources, stamp.issued_at_ms);
        let resource = Resource {
            id,
            name: new.name,
            resource_type: new.resource_type,
            modified: stamp.modified.clone(),
            modified_by: stamp.modified_by.clone(),
            is_protected: new.is_protected,
            url: new.url,
            parent_id: new.parent_id,
        };

        debug!(id, name = %resource.name, "Resource created");

        let mut next = Vec::with_capacity(resources.len() + 1);
        next.extend_from_slice(resources);
        next.push(resource.clone());
        Mutation {
            resources: next,
            affected: resource,
        }
    }

    /// Merge `patch` over the resource with `id` and refresh its stamp.
    ///
    /// Returns `None` when no resource has that ID.
    pub fn update(
        &self,
        resources: &[Resource],
        id: ResourceId,
        patch: &ResourcePatch,
        stamp: &Stamp,
    ) -> Option<Mutation> {
        let position = resources.iter().position(|r| r.id == id)?;

        let mut next = resources.to_vec();
        let resource = &mut next[position];
        patch.apply_to(resource);
        resource.id = id;
        resource.modified = stamp.modified.clone();
        resource.modified_by = stamp.modified_by.clone();
        let affected = resource.clone();

        debug!(id, name = %affected.name, "Resource updated");
        Some(Mutation {
            resources: next,
            affected,
        })
    }

    /// Remove the resource with `id`.
    ///
    /// Children are left in place; their parent link simply dangles.
    /// Returns `None` when no resource has that ID.
    pub fn delete(&self, resources: &[Resource], id: ResourceId) -> Option<Mutation> {
        let position = resources.iter().position(|r| r.id == id)?;

        let mut next = resources.to_vec();
        let affected = next.remove(position);

        debug!(id, name = %affected.name, "Resource deleted");
        Some(Mutation {
            resources: next,
            affected,
        })
    }
}

/// Next free ID at `now_ms`.
pub fn next_id(resources: &[Resource], now_ms: i64) -> ResourceId {
    let highest = resources.iter().map(|r| r.id).max().unwrap_or(0);
    now_ms.max(highest.saturating_add(1))
}
