//! Message relay
//!
//! Forwards a chat message to whichever session is currently registered for
//! its receiver. Nothing is stored: if the receiver isn't reachable right now
//! the message is gone.

use super::{HandlerError, HandlerResult};
use crate::connection::{Connection, ConnectionManager};
use crate::protocol::{EventName, MessageTarget, OutboundEvent};
use serde_json::value::RawValue;
use tokio::sync::mpsc::error::TrySendError;

/// What happened to a relayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Enqueued on the receiver's session
    Delivered,
    /// Receiver has no registered session
    ReceiverOffline,
    /// Receiver's outbound queue is full
    QueueFull,
    /// Receiver's session is shutting down
    SessionClosed,
}

/// Relays `message` events between users
pub struct MessageRelay;

impl MessageRelay {
    /// Relay a `message` event sent on `sender`
    ///
    /// Delivery is a single non-blocking enqueue; the payload is forwarded
    /// exactly as received.
    pub fn relay(
        manager: &ConnectionManager,
        sender: &Connection,
        data: Option<&RawValue>,
    ) -> HandlerResult<RelayOutcome> {
        let event = EventName::Message.as_str();
        let data = data.ok_or_else(|| HandlerError::invalid_payload(event, "missing data"))?;
        let target =
            MessageTarget::from_raw(data).map_err(|e| HandlerError::invalid_payload(event, e))?;

        tracing::debug!(
            session_id = %sender.session_id(),
            sender_id = ?sender.user_id(),
            receiver_id = %target.receiver_id,
            "Received message"
        );

        let Some(receiver) = manager.resolve_user(&target.receiver_id) else {
            tracing::debug!(
                receiver_id = %target.receiver_id,
                "Receiver not connected, message dropped"
            );
            return Ok(RelayOutcome::ReceiverOffline);
        };

        let outcome = match receiver.try_send(OutboundEvent::message(data.to_owned())) {
            Ok(()) => RelayOutcome::Delivered,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    receiver_id = %target.receiver_id,
                    receiver_session = %receiver.session_id(),
                    "Receiver queue full, message dropped"
                );
                RelayOutcome::QueueFull
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(
                    receiver_id = %target.receiver_id,
                    receiver_session = %receiver.session_id(),
                    "Receiver session closing, message dropped"
                );
                RelayOutcome::SessionClosed
            }
        };

        if outcome == RelayOutcome::Delivered {
            tracing::trace!(
                receiver_id = %target.receiver_id,
                receiver_session = %receiver.session_id(),
                "Message relayed"
            );
        }

        Ok(outcome)
    }
}
