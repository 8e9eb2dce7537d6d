//! Join Room handler

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{EventName, JoinRoomPayload};
use serde_json::value::RawValue;

/// Handles `join_room` events
///
/// Rooms are not delivery groups: joining one is recorded on the session for
/// diagnostics and has no effect on where messages are routed.
pub struct JoinRoomHandler;

impl JoinRoomHandler {
    /// Handle a `join_room` event
    pub fn handle(connection: &Connection, data: Option<&RawValue>) -> HandlerResult<()> {
        let event = EventName::JoinRoom.as_str();
        let data = data.ok_or_else(|| HandlerError::invalid_payload(event, "missing data"))?;
        let payload =
            JoinRoomPayload::from_raw(data).map_err(|e| HandlerError::invalid_payload(event, e))?;

        let newly_joined = connection.join_room(payload.roomid.as_str());

        tracing::info!(
            session_id = %connection.session_id(),
            user_id = ?connection.user_id(),
            room_id = %payload.roomid,
            newly_joined,
            "User joined room"
        );

        Ok(())
    }
}
