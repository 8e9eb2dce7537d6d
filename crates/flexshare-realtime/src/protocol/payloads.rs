//! Typed views over inbound event data
//!
//! These only pick out the fields the server routes on; everything else in
//! the payload is left to the clients.

use serde::Deserialize;
use serde_json::value::RawValue;

/// Join Room payload
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRoomPayload {
    /// Room identifier chosen by the client
    pub roomid: String,
}

/// The routing field of a `message` payload
#[derive(Debug, Clone, Deserialize)]
pub struct MessageTarget {
    /// User the message is addressed to
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
}

impl JoinRoomPayload {
    /// Parse from raw event data
    pub fn from_raw(raw: &RawValue) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.get())
    }
}

impl MessageTarget {
    /// Parse from raw event data
    pub fn from_raw(raw: &RawValue) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.get())
    }
}
