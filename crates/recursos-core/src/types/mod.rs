//! Shared value types.

pub mod token;

pub use token::AccessToken;
