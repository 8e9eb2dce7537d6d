//! Connection manager
//!
//! Owns the session table and the user registry, and moves connections
//! through their lifecycle. Uses `DashMap` so handlers on different worker
//! threads can admit, retire and look up sessions concurrently.

use super::{Connection, ConnectionRegistry, ConnectionState, Handshake};
use crate::protocol::OutboundEvent;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all open WebSocket connections
pub struct ConnectionManager {
    /// Open connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// User ID to current session ID
    registry: ConnectionRegistry,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            registry: ConnectionRegistry::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Admit a freshly upgraded connection
    ///
    /// The session is always recorded; its user is registered only if the
    /// handshake carried a usable identity. A user already registered on
    /// another session is re-pointed at this one.
    pub fn admit(
        &self,
        session_id: String,
        handshake: &Handshake,
        sender: mpsc::Sender<OutboundEvent>,
    ) -> Arc<Connection> {
        let user_id = handshake.identity().map(str::to_owned);
        let connection = Connection::new(session_id.clone(), user_id, sender);

        self.connections.insert(session_id.clone(), connection.clone());

        if let Some(user_id) = connection.user_id() {
            if let Some(previous) = self.registry.get(user_id) {
                tracing::debug!(
                    user_id = %user_id,
                    previous_session = %previous,
                    session_id = %session_id,
                    "User reconnected, replacing registered session"
                );
            }
            self.registry.put(user_id, session_id.as_str());
        } else {
            tracing::debug!(
                session_id = %session_id,
                "No usable user id in handshake, session will not receive messages"
            );
        }

        connection.set_state(ConnectionState::Connected);

        tracing::debug!(
            session_id = %session_id,
            user_id = ?connection.user_id(),
            "Connection admitted"
        );

        connection
    }

    /// Retire a closed connection
    ///
    /// The registry entry for the session's user is removed only if it still
    /// points at this session, so a faster reconnect of the same user keeps
    /// its mapping.
    pub fn retire(&self, session_id: &str) -> Option<Arc<Connection>> {
        let (_, connection) = self.connections.remove(session_id)?;
        connection.set_state(ConnectionState::Disconnected);

        if let Some(user_id) = connection.user_id() {
            if self.registry.remove_if_session(user_id, session_id) {
                tracing::debug!(user_id = %user_id, session_id = %session_id, "User deregistered");
            } else {
                tracing::debug!(
                    user_id = %user_id,
                    session_id = %session_id,
                    "Registry entry belongs to a newer session, kept"
                );
            }
        }

        tracing::debug!(session_id = %session_id, "Connection retired");

        Some(connection)
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Resolve the connection currently registered for a user
    pub fn resolve_user(&self, user_id: &str) -> Option<Arc<Connection>> {
        let session_id = self.registry.get(user_id)?;
        self.get_connection(&session_id)
    }

    /// Get the user registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Get the total number of open connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of registered users
    pub fn user_count(&self) -> usize {
        self.registry.len()
    }

    /// Check if a session exists
    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("users", &self.registry.len())
            .finish()
    }
}
