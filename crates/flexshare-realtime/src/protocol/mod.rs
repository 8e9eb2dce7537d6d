//! Realtime protocol definitions
//!
//! Every frame is a JSON text message of the form `{"event": <name>, "data": <payload>}`.

mod event_names;
mod messages;
mod payloads;

pub use event_names::EventName;
pub use messages::{InboundEvent, OutboundEvent};
pub use payloads::{JoinRoomPayload, MessageTarget};
