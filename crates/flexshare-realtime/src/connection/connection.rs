//! Individual WebSocket connection
//!
//! Represents a single open session and its state.

use crate::protocol::OutboundEvent;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Upgrade in progress, nothing registered yet
    Connecting,
    /// Admitted; events are being processed
    Connected,
    /// Closed; terminal
    Disconnected,
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// User identity captured at handshake (None for anonymous sessions)
    user_id: Option<String>,

    /// Current connection state
    state: RwLock<ConnectionState>,

    /// Outbound queue drained by the socket writer
    sender: mpsc::Sender<OutboundEvent>,

    /// Rooms announced via `join_room` (diagnostic only)
    rooms: RwLock<HashSet<String>>,

    /// Connection creation time
    connected_at: DateTime<Utc>,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        session_id: String,
        user_id: Option<String>,
        sender: mpsc::Sender<OutboundEvent>,
    ) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            user_id,
            state: RwLock::new(ConnectionState::Connecting),
            sender,
            rooms: RwLock::new(HashSet::new()),
            connected_at: Utc::now(),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the user ID captured at handshake
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Set the connection state
    pub fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    /// Record a joined room
    ///
    /// Returns `false` if the room was already recorded.
    pub fn join_room(&self, room_id: impl Into<String>) -> bool {
        self.rooms.write().insert(room_id.into())
    }

    /// Get all announced rooms
    pub fn rooms(&self) -> Vec<String> {
        self.rooms.read().iter().cloned().collect()
    }

    /// When the connection was admitted
    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Enqueue an event without waiting
    pub fn try_send(
        &self,
        event: OutboundEvent,
    ) -> Result<(), mpsc::error::TrySendError<OutboundEvent>> {
        self.sender.try_send(event)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("state", &self.state())
            .field("rooms", &self.rooms.read().len())
            .field("connected_at", &self.connected_at)
            .finish()
    }
}
