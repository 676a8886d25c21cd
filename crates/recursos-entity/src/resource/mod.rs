//! Resource domain entities.

pub mod kind;
pub mod model;

pub use kind::ResourceType;
pub use model::{NewResource, Resource, ResourceId, ResourcePatch};
