//! Session identity
//!
//! Session ids and the handshake parameters a client presents on upgrade.

use serde::Deserialize;

/// Placeholder some clients send when they have no user id yet
const UNDEFINED_IDENTITY: &str = "undefined";

/// Session helper
pub struct Session;

impl Session {
    /// Generate a new session ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Query parameters of the upgrade request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Handshake {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl Handshake {
    /// Create a handshake for a user id
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// The identity to register, if the client presented a usable one
    ///
    /// Absent, empty, and `"undefined"` all mean the session is anonymous:
    /// it may send but will never be a relay target.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != UNDEFINED_IDENTITY)
    }
}
