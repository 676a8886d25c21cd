//! # recursos-entity
//!
//! Domain entity models for the resource portal. Every struct in this
//! crate is either a persisted record (a [`Resource`] inside a section
//! list) or a domain value object. Persisted records keep the camelCase
//! JSON layout the portal has always written.

pub mod breadcrumb;
pub mod resource;
pub mod section;
pub mod settings;
pub mod user;

pub use breadcrumb::Breadcrumb;
pub use resource::{NewResource, Resource, ResourceId, ResourcePatch, ResourceType};
pub use section::Section;
pub use settings::Theme;
pub use user::User;
