//! Connection registry
//!
//! Maps each user id to the session that most recently connected as that user.

use dashmap::DashMap;

/// In-memory `user id -> session id` table
///
/// Lives for the lifetime of the process. Every operation is atomic per key,
/// so connection handlers may run on any worker thread.
#[derive(Default)]
pub struct ConnectionRegistry {
    users: DashMap<String, String>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Record `session_id` as the session for `user_id`, replacing any previous one
    pub fn put(&self, user_id: impl Into<String>, session_id: impl Into<String>) {
        self.users.insert(user_id.into(), session_id.into());
    }

    /// Look up the current session for a user
    pub fn get(&self, user_id: &str) -> Option<String> {
        self.users.get(user_id).map(|r| r.value().clone())
    }

    /// Remove the entry for a user, if any
    pub fn remove(&self, user_id: &str) {
        self.users.remove(user_id);
    }

    /// Remove the entry for a user only while it still points at `session_id`
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_if_session(&self, user_id: &str, session_id: &str) -> bool {
        self.users
            .remove_if(user_id, |_, current| current == session_id)
            .is_some()
    }

    /// Check whether a user has a registered session
    pub fn contains(&self, user_id: &str) -> bool {
        self.users.contains_key(user_id)
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no user is registered
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("users", &self.users.len())
            .finish()
    }
}
