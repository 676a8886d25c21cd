//! # recursos-core
//!
//! Core crate for the resource portal. Contains the collaborator traits
//! (upload gateway, persisted state store), configuration schemas, the
//! access-token type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
