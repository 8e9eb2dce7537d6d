//! Realtime state
//!
//! Application state shared by every request and socket handler.

use crate::connection::ConnectionManager;
use flexshare_common::AppConfig;
use std::sync::Arc;

/// Realtime application state
///
/// Created once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct RealtimeState {
    /// Session table and user registry
    connections: Arc<ConnectionManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl RealtimeState {
    /// Create a new realtime state
    pub fn new(connections: Arc<ConnectionManager>, config: AppConfig) -> Self {
        Self {
            connections,
            config: Arc::new(config),
        }
    }

    /// Get the connection manager
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for RealtimeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeState")
            .field("connections", &self.connections)
            .field("config", &"AppConfig")
            .finish()
    }
}
