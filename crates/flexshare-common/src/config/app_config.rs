//! Application configuration structs
//!
//! Loads configuration from environment variables. Every credential the
//! marketplace collaborators need is required up front so a misconfigured
//! process never accepts a connection.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub payments: PaymentsConfig,
    pub image_hosting: ImageHostingConfig,
    pub cors: CorsConfig,
    pub realtime: RealtimeConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP / WebSocket listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Payment provider credentials
#[derive(Clone)]
pub struct PaymentsConfig {
    pub secret_key: String,
}

impl fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

/// Image hosting credentials
#[derive(Clone)]
pub struct ImageHostingConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for ImageHostingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHostingConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Realtime channel tuning
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Capacity of each session's outbound queue
    pub buffer_size: usize,
}

// Default value functions
fn default_app_name() -> String {
    "flexshare".to_string()
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:19006".to_string()]
}

fn default_buffer_size() -> usize {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let payments = PaymentsConfig {
            secret_key: required("STRIPE_SECRET_KEY")?,
        };

        let image_hosting = ImageHostingConfig {
            cloud_name: required("CLOUDINARY_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_SECRET")?,
        };

        let port = required("PORT")?;
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("PORT", port.clone()))?;

        // HOST must be an IP literal; hostnames are not resolved
        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidValue("HOST", raw.clone()))?,
            None => default_host(),
        };

        let buffer_size = match lookup("SOCKET_BUFFER_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidValue("SOCKET_BUFFER_SIZE", raw)),
            },
            None => default_buffer_size(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host,
                port,
            },
            payments,
            image_hosting,
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(default_allowed_origins),
            },
            realtime: RealtimeConfig { buffer_size },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
