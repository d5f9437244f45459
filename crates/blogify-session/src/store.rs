use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use blogify_storage::{validate_key, Storage};
use blogify_types::Session;

use crate::error::{SessionError, SessionResult};

/// Storage key of the session record.
pub const DEFAULT_SESSION_KEY: &str = "blogify-user";

/// The email address that logs in as an administrator.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@blogify.com";

/// Owner of the current identity.
///
/// The session is written to storage on login and removed on logout, so it
/// survives reopening until an explicit logout.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    key: String,
    admin_email: String,
    current: RwLock<Option<Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("admin_email", &self.admin_email)
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl SessionStore {
    /// Open the store over `storage` with the default key and admin address.
    pub fn open(storage: Arc<dyn Storage>) -> SessionResult<Self> {
        Self::open_with(storage, DEFAULT_SESSION_KEY, DEFAULT_ADMIN_EMAIL)
    }

    /// Open the store with a custom record key and admin address.
    ///
    /// A missing record means "logged out". So does an unreadable or corrupt
    /// one, which is logged and otherwise ignored.
    pub fn open_with(
        storage: Arc<dyn Storage>,
        key: impl Into<String>,
        admin_email: impl Into<String>,
    ) -> SessionResult<Self> {
        let key = key.into();
        validate_key(&key)?;

        let current = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!(email = %session.email, "restored session");
                    Some(session)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "stored session is corrupt; treating as logged out");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "storage unavailable; treating as logged out");
                None
            }
        };

        Ok(Self {
            storage,
            key,
            admin_email: admin_email.into(),
            current: RwLock::new(current),
        })
    }

    /// The address that yields an admin session.
    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// The current session, if anyone is logged in.
    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Returns `true` if the current session is an administrator.
    pub fn is_admin(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|s| s.is_admin)
    }

    /// Log in. The password is not checked beyond being non-empty.
    ///
    /// Returns `Ok(None)` and changes nothing if either input is empty;
    /// otherwise persists and returns the new session, replacing any
    /// previous one.
    pub fn login(&self, email: &str, password: &str) -> SessionResult<Option<Session>> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            debug!("login with empty credentials ignored");
            return Ok(None);
        }

        let session = Session::derive(email, &self.admin_email);
        let json =
            serde_json::to_string(&session).map_err(|e| SessionError::Serialization(e.to_string()))?;

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        self.storage.set(&self.key, &json)?;
        *current = Some(session.clone());
        info!(email = %session.email, admin = session.is_admin, "logged in");
        Ok(Some(session))
    }

    /// Clear the current session and its persisted record.
    ///
    /// Returns the session that was cleared, if any.
    pub fn logout(&self) -> SessionResult<Option<Session>> {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        self.storage.remove(&self.key)?;
        let previous = current.take();
        if let Some(s) = &previous {
            info!(email = %s.email, "logged out");
        }
        Ok(previous)
    }
}
