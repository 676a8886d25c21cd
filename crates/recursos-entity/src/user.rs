//! Signed-in user profile.

use serde::{Deserialize, Serialize};

/// Profile extracted from the identity assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name, stamped into `modifiedBy`.
    pub name: String,
    /// E-mail address.
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub picture: String,
}
