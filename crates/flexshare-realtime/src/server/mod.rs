//! Realtime server setup
//!
//! Provides the HTTP router hosting the WebSocket endpoint, plus the welcome
//! and health routes.

mod handler;
mod state;

pub use handler::socket_handler;
pub use state::RealtimeState;

use crate::connection::ConnectionManager;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    response::Html,
    routing::get,
    Json, Router,
};
use flexshare_common::{AppConfig, AppError, AppResult, CorsConfig};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Path of the WebSocket endpoint
pub const SOCKET_PATH: &str = "/socket";

/// Create the realtime router
pub fn create_router() -> Router<RealtimeState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .route(SOCKET_PATH, get(socket_handler))
}

/// Landing page
async fn welcome() -> Html<&'static str> {
    Html("<h1>Welcome to node FlexShare</h1>")
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
    pub users: usize,
}

/// Health check endpoint with live connection counts
async fn health_check(State(state): State<RealtimeState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        connections: state.connections().connection_count(),
        users: state.connections().user_count(),
    })
}

/// Build the complete application
pub fn create_app(state: RealtimeState) -> Router {
    let cors = create_cors_layer(&state.config().cors);

    create_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    tracing::info!("CORS: Allowing {} configured origins", origins.len());

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(origins))
}

/// Initialize shared dependencies and create `RealtimeState`
pub fn create_realtime_state(config: AppConfig) -> RealtimeState {
    tracing::info!("Payment provider configured");
    tracing::info!(
        cloud_name = %config.image_hosting.cloud_name,
        "Image hosting configured"
    );

    RealtimeState::new(ConnectionManager::new_shared(), config)
}

/// Run the server on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> AppResult<()> {
    axum::serve(listener, app).await.map_err(AppError::Server)
}

/// Bind and run the server
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    tracing::info!("Starting realtime server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;

    tracing::info!("Realtime channel listening on ws://{}{}", addr, SOCKET_PATH);

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.server.socket_addr();

    let state = create_realtime_state(config);
    let app = create_app(state);

    run_server(app, addr).await
}
