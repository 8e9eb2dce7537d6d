//! FlexShare realtime server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p flexshare-realtime
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use flexshare_common::{install_panic_hook, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing isn't configured yet, so use the default subscriber
            let _ = flexshare_common::try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }
    install_panic_hook();

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.server.port,
        "Configuration loaded"
    );

    if let Err(e) = flexshare_realtime::run(config).await {
        error!(error = %e, code = e.error_code(), "Realtime server failed");
        std::process::exit(1);
    }
}
