//! Core traits defined in `recursos-core` and implemented by other crates.

pub mod state;
pub mod upload;

pub use state::StateStore;
pub use upload::{UploadFile, UploadGateway, UploadTarget};
