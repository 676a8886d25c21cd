//! Identity assertion (JWT) decoding.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind as JwtErrorKind};
use serde::Deserialize;

use recursos_core::config::AuthConfig;
use recursos_core::error::AppError;
use recursos_entity::User;

/// Seconds of clock skew tolerated on `exp`.
const LEEWAY_SECS: i64 = 5;

/// `aud` is a single string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn contains(&self, client_id: &str) -> bool {
        match self {
            Self::One(aud) => aud == client_id,
            Self::Many(auds) => auds.iter().any(|a| a == client_id),
        }
    }
}

/// Profile claims carried by the assertion.
#[derive(Debug, Clone, Deserialize)]
struct ProfileClaims {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    picture: Option<String>,
    #[serde(default)]
    aud: Option<Audience>,
    #[serde(default)]
    exp: Option<i64>,
}

/// How assertions are read.
#[derive(Clone)]
enum Mode {
    /// HS256 signature, expiry and audience checked by `jsonwebtoken`.
    Verified {
        decoding_key: DecodingKey,
        validation: Box<Validation>,
    },
    /// Payload read as-is; expiry and audience checked here.
    Unverified,
}

/// Turns identity assertions into users.
#[derive(Clone)]
pub struct IdentityDecoder {
    mode: Mode,
    client_id: Option<String>,
    validate_expiry: bool,
}

impl std::fmt::Debug for IdentityDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.mode {
            Mode::Verified { .. } => "verified",
            Mode::Unverified => "unverified",
        };
        f.debug_struct("IdentityDecoder")
            .field("mode", &mode)
            .field("client_id", &self.client_id)
            .field("validate_expiry", &self.validate_expiry)
            .finish()
    }
}

impl IdentityDecoder {
    /// Creates a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let client_id = config
            .client_id
            .clone()
            .filter(|c| !c.is_empty());

        let mode = match config.identity_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_exp = config.validate_expiry;
                validation.leeway = LEEWAY_SECS as u64;
                validation.required_spec_claims = if config.validate_expiry {
                    HashSet::from(["exp".to_string()])
                } else {
                    HashSet::new()
                };
                match client_id.as_deref() {
                    Some(client_id) => validation.set_audience(&[client_id]),
                    None => validation.validate_aud = false,
                }
                Mode::Verified {
                    decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                    validation: Box::new(validation),
                }
            }
            None => Mode::Unverified,
        };

        Self {
            mode,
            client_id,
            validate_expiry: config.validate_expiry,
        }
    }

    /// Decodes an assertion into the signed-in user's profile.
    pub fn decode(&self, assertion: &str) -> Result<User, AppError> {
        let assertion = assertion.trim();
        let claims = match &self.mode {
            Mode::Verified {
                decoding_key,
                validation,
            } => decode::<ProfileClaims>(assertion, decoding_key, validation)
                .map_err(decode_error)?
                .claims,
            Mode::Unverified => {
                let claims = jsonwebtoken::dangerous::insecure_decode::<ProfileClaims>(assertion)
                    .map_err(decode_error)?
                    .claims;
                self.check_unverified(&claims)?;
                claims
            }
        };

        let email = claims
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AppError::authentication("Could not decode user profile from credential")
            })?;
        let name = claims
            .name
            .or(claims.given_name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        tracing::debug!(email = %email, "Identity assertion accepted");

        Ok(User {
            name,
            email,
            picture: claims.picture.unwrap_or_default(),
        })
    }

    fn check_unverified(&self, claims: &ProfileClaims) -> Result<(), AppError> {
        if self.validate_expiry {
            let exp = claims
                .exp
                .ok_or_else(|| AppError::authentication("Identity assertion has no expiry"))?;
            if exp + LEEWAY_SECS < chrono::Utc::now().timestamp() {
                return Err(AppError::authentication("Identity assertion has expired"));
            }
        }
        if let Some(client_id) = self.client_id.as_deref() {
            let issued_for_us = claims.aud.as_ref().is_some_and(|aud| aud.contains(client_id));
            if !issued_for_us {
                return Err(AppError::authentication(
                    "Identity assertion was issued for another client",
                ));
            }
        }
        Ok(())
    }
}

fn decode_error(e: jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        JwtErrorKind::ExpiredSignature => AppError::authentication("Identity assertion has expired"),
        JwtErrorKind::InvalidSignature => {
            AppError::authentication("Invalid identity assertion signature")
        }
        JwtErrorKind::InvalidAudience => {
            AppError::authentication("Identity assertion was issued for another client")
        }
        _ => AppError::authentication(format!("Could not decode identity assertion: {e}")),
    }
}
