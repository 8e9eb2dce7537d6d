//! Event handlers
//!
//! Routes decoded client frames to the handler for their event name.

mod error;
mod join_room;
mod message;

pub use error::{HandlerError, HandlerResult};
pub use join_room::JoinRoomHandler;
pub use message::{MessageRelay, RelayOutcome};

use crate::connection::{Connection, ConnectionManager};
use crate::protocol::{EventName, InboundEvent};

/// Dispatch incoming client frames to appropriate handlers
pub struct EventDispatcher;

impl EventDispatcher {
    /// Decode and handle one text frame
    pub fn dispatch(
        manager: &ConnectionManager,
        connection: &Connection,
        text: &str,
    ) -> HandlerResult<()> {
        let event = InboundEvent::from_json(text).map_err(HandlerError::MalformedFrame)?;

        let Some(name) = event.name() else {
            return Err(HandlerError::UnknownEvent(event.event));
        };

        tracing::trace!(
            session_id = %connection.session_id(),
            event = %name,
            "Received event"
        );

        match name {
            EventName::JoinRoom => JoinRoomHandler::handle(connection, event.data.as_deref()),
            EventName::Message => {
                MessageRelay::relay(manager, connection, event.data.as_deref()).map(|_| ())
            }
        }
    }
}
