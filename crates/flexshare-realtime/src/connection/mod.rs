//! Connection management
//!
//! Tracks open sessions, which user each one belongs to, and drives their lifecycle.

mod connection;
mod manager;
mod registry;
mod session;

pub use connection::{Connection, ConnectionState};
pub use manager::ConnectionManager;
pub use registry::ConnectionRegistry;
pub use session::{Handshake, Session};
