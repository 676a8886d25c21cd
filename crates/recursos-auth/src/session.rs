//! Signed-in user and storage authorization state.

use recursos_core::types::AccessToken;
use recursos_entity::User;

/// Authentication state of the running portal.
///
/// Only two user states matter to the core: someone is signed in, or
/// nobody is. Storage authorization is a bearer token obtained after
/// sign-in; it is dropped together with the user on sign-out.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    user: Option<User>,
    storage_token: Option<AccessToken>,
}

impl AuthSession {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Record a successful sign-in.
    pub fn sign_in(&mut self, user: User) {
        tracing::info!(email = %user.email, "User signed in");
        self.user = Some(user);
    }

    /// Forget the user and any storage authorization.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "User signed out");
        }
        self.storage_token = None;
    }

    /// Store the bearer token granted by the storage provider.
    ///
    /// Requires a signed-in user; returns whether the token was accepted.
    pub fn grant_storage(&mut self, token: AccessToken) -> bool {
        if self.user.is_none() {
            return false;
        }
        self.storage_token = Some(token);
        true
    }

    /// Token for upload requests, present only while authorized.
    pub fn storage_token(&self) -> Option<&AccessToken> {
        if self.user.is_some() {
            self.storage_token.as_ref()
        } else {
            None
        }
    }

    /// Whether upload-backed saves may proceed.
    pub fn is_authorized(&self) -> bool {
        self.storage_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            name: "Ana".into(),
            email: "ana@mined.gob.sv".into(),
            picture: String::new(),
        }
    }

    #[test]
    fn test_storage_requires_user() {
        let mut session = AuthSession::anonymous();
        assert!(!session.grant_storage(AccessToken::new("t").unwrap()));
        assert!(!session.is_authorized());

        session.sign_in(ana());
        assert!(session.grant_storage(AccessToken::new("t").unwrap()));
        assert!(session.is_authorized());
    }

    #[test]
    fn test_sign_out_drops_token() {
        let mut session = AuthSession::anonymous();
        session.sign_in(ana());
        session.grant_storage(AccessToken::new("t").unwrap());
        session.sign_out();
        assert!(!session.is_signed_in());
        assert!(session.storage_token().is_none());
    }
}
