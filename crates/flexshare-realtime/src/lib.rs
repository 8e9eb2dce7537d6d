//! # flexshare-realtime
//!
//! WebSocket channel that tracks which session belongs to which user and
//! relays chat messages between them.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use server::{create_app, create_realtime_state, run, RealtimeState};
