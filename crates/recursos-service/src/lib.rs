//! # recursos-service
//!
//! The portal's resource-tree state manager. Each module covers one
//! concern:
//!
//! - [`navigator`]: listings and breadcrumb trails for a folder
//! - [`mutator`]: create/update/delete over a section list
//! - [`store`]: loading and persisting section lists and settings
//! - [`save`]: validating a resource form and planning its upload
//! - [`state`]: the explicit application state and its transitions
//! - [`controller`]: the view controller tying everything together
//!
//! Services follow constructor injection; collaborators arrive as
//! `Arc<dyn Trait>` at construction time.

pub mod controller;
pub mod mutator;
pub mod navigator;
pub mod save;
pub mod seed;
pub mod state;
pub mod store;

pub use controller::{OpenOutcome, SignIn, ViewController, ViewSnapshot};
pub use mutator::{ResourceMutator, Stamp};
pub use navigator::FolderView;
pub use save::SaveRequest;
pub use state::{AppState, SectionChange};
pub use store::ResourceStore;
