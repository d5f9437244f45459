use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name given to the administrative identity.
pub const ADMIN_NAME: &str = "Admin User";

/// Display name given to every other identity.
pub const REGULAR_NAME: &str = "Regular User";

/// The identity held by the client after login.
///
/// Every field is derived from the email address; nothing is verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Session {
    /// Derive the session for `email`. The identity is an administrator iff
    /// `email` equals `admin_email` exactly.
    pub fn derive(email: &str, admin_email: &str) -> Self {
        let is_admin = email == admin_email;
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()).to_string(),
            name: if is_admin { ADMIN_NAME } else { REGULAR_NAME }.to_string(),
            email: email.to_string(),
            is_admin,
        }
    }
}
