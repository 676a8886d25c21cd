//! Portal behaviour configuration.

use serde::{Deserialize, Serialize};

/// General portal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Name stamped into `modifiedBy` when nobody is signed in.
    #[serde(default = "default_user_name")]
    pub default_user_name: String,
    /// Section shown at startup (`monitoreo`, `supervision`, `centros-escolares`).
    #[serde(default = "default_initial_section")]
    pub initial_section: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            default_user_name: default_user_name(),
            initial_section: default_initial_section(),
        }
    }
}

fn default_user_name() -> String {
    "Usuario".to_string()
}

fn default_initial_section() -> String {
    "centros-escolares".to_string()
}
