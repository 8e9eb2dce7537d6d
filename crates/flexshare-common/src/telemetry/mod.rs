//! Telemetry and tracing setup

mod tracing_setup;

pub use tracing_setup::{
    install_panic_hook, try_init_tracing, try_init_tracing_with_config, TracingConfig,
    TracingError,
};
