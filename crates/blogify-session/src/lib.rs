//! Session store for Blogify.
//!
//! The [`SessionStore`] holds the identity of whoever logged in last. Login
//! is deliberately non-verifying: any non-empty email/password pair is
//! accepted and every session field is derived from the email. This is UI
//! state, not a security boundary.

pub mod error;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use store::{SessionStore, DEFAULT_ADMIN_EMAIL, DEFAULT_SESSION_KEY};
