//! Frame envelope
//!
//! Payloads are kept as raw JSON so a relayed message reaches the receiver
//! exactly as the sender wrote it.

use super::EventName;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A frame received from a client
#[derive(Debug, Deserialize)]
pub struct InboundEvent {
    /// Event name
    pub event: String,

    /// Event data, untouched
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

impl InboundEvent {
    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the event name, if it is one the channel understands
    #[must_use]
    pub fn name(&self) -> Option<EventName> {
        EventName::from_name(&self.event)
    }
}

/// A frame sent to a client
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEvent {
    /// Event name
    pub event: &'static str,

    /// Event data, forwarded verbatim
    pub data: Box<RawValue>,
}

impl OutboundEvent {
    /// Create an outbound `message` event
    #[must_use]
    pub fn message(data: Box<RawValue>) -> Self {
        Self {
            event: EventName::Message.as_str(),
            data,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for OutboundEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OutboundEvent(event={}, bytes={})", self.event, self.data.get().len())
    }
}
