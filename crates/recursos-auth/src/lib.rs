//! # recursos-auth
//!
//! Authentication for the resource portal:
//!
//! - **identity**: decoding the signed identity assertion handed over by
//!   the sign-in flow into a [`User`](recursos_entity::User)
//! - **session**: who is signed in and whether storage uploads are
//!   authorized

pub mod identity;
pub mod session;

pub use identity::IdentityDecoder;
pub use session::AuthSession;
