//! Identity assertion configuration.

use serde::{Deserialize, Serialize};

/// Settings for decoding signed identity assertions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth client id; when set, the assertion audience must match it.
    #[serde(default)]
    pub client_id: Option<String>,
    /// HMAC secret for verifying assertion signatures (HS256).
    ///
    /// When absent the payload is read without signature verification,
    /// which matches the browser sign-in flow where the identity provider
    /// hands the assertion straight to the page.
    #[serde(default)]
    pub identity_secret: Option<String>,
    /// Reject assertions whose `exp` claim has passed.
    #[serde(default)]
    pub validate_expiry: bool,
}
