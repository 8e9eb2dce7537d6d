//! Event names understood by the realtime channel

use std::fmt;

/// Named events carried in the `event` field of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Client announces interest in a conversation room
    JoinRoom,
    /// Chat message, inbound from the sender and outbound to the receiver
    Message,
}

impl EventName {
    /// Look up an event by its wire name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "join_room" => Some(Self::JoinRoom),
            "message" => Some(Self::Message),
            _ => None,
        }
    }

    /// Get the wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JoinRoom => "join_room",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
