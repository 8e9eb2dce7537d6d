//! WebSocket handler
//!
//! Upgrades `/socket` requests and runs one reader and one writer task per
//! connection. Frames on a connection are handled strictly in arrival order.

use crate::connection::{Connection, Handshake, Session};
use crate::handlers::EventDispatcher;
use crate::protocol::OutboundEvent;
use crate::server::RealtimeState;
use axum::{
    extract::{
        rejection::QueryRejection,
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// WebSocket upgrade handler
///
/// A query string that does not decode still upgrades, as an anonymous session.
pub async fn socket_handler(
    State(state): State<RealtimeState>,
    query: Result<Query<Handshake>, QueryRejection>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let handshake = match query {
        Ok(Query(handshake)) => handshake,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable handshake query, admitting anonymously");
            Handshake::default()
        }
    };

    ws.on_upgrade(move |socket| handle_socket(state, handshake, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: RealtimeState, handshake: Handshake, socket: WebSocket) {
    let session_id = Session::generate_id();

    // Outgoing events for this session
    let (tx, mut rx) = mpsc::channel::<OutboundEvent>(state.config().realtime.buffer_size);

    let connection = state
        .connections()
        .admit(session_id.clone(), &handshake, tx);

    tracing::info!(
        session_id = %session_id,
        user_id = ?connection.user_id(),
        "User connected"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    let state_recv = state.clone();
    let connection_recv = connection.clone();

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text);
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        "Binary frames not supported, ignored"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let session_id_send = session_id.clone();

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match event.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(session_id = %session_id_send, error = %e, "Failed to encode event");
                    continue;
                }
            };

            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(
                    session_id = %session_id_send,
                    "Failed to send event to WebSocket"
                );
                break;
            }
        }

        let _ = ws_sink.close().await;
    });

    // Whichever side finishes first ends the session
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    }

    cleanup_connection(&state, &session_id, connection);
}

/// Handle a text frame from the client
///
/// Errors are logged and the connection stays open.
fn handle_text_message(state: &RealtimeState, connection: &Arc<Connection>, text: &str) {
    if let Err(e) = EventDispatcher::dispatch(state.connections(), connection, text) {
        tracing::debug!(
            session_id = %connection.session_id(),
            error = %e,
            "Ignoring frame"
        );
    }
}

/// Clean up a connection on disconnect
fn cleanup_connection(state: &RealtimeState, session_id: &str, connection: Arc<Connection>) {
    let duration = chrono::Utc::now() - connection.connected_at();

    state.connections().retire(session_id);

    tracing::info!(
        session_id = %session_id,
        user_id = ?connection.user_id(),
        connected_secs = duration.num_seconds(),
        "User disconnected"
    );
}
