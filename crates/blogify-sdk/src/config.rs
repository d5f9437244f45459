use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use blogify_content::DEFAULT_POSTS_KEY;
use blogify_session::{DEFAULT_ADMIN_EMAIL, DEFAULT_SESSION_KEY};

use crate::error::{SdkError, SdkResult};

/// Runtime configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogifyConfig {
    /// Directory holding the persisted records.
    pub data_dir: PathBuf,
    /// Record key of the post collection.
    pub posts_key: String,
    /// Record key of the current session.
    pub session_key: String,
    /// Logging in with this address yields an admin session.
    pub admin_email: String,
}

impl Default for BlogifyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".blogify"),
            posts_key: DEFAULT_POSTS_KEY.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }
}

impl BlogifyConfig {
    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}
