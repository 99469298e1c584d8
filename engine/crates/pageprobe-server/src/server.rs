//! HTTP scan API
//!
//! Routes:
//! - `POST /scan` runs one scan and returns the report
//! - `GET /health` liveness probe

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pageprobe_core::{Error, ScanReport, ScanRequest};
use pageprobe_webapp::WebScanner;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    scanner: WebScanner,
}

impl AppState {
    pub fn new(scanner: WebScanner) -> Self {
        Self { scanner }
    }
}

/// Error body returned by every failing route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Liveness response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Scan error surfaced over HTTP as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            debug!(code = self.0.code(), "Rejected scan request: {}", self.0);
        } else {
            warn!(code = self.0.code(), "Scan failed: {}", self.0);
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the API router with permissive CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scan", post(scan))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanReport>, ApiError> {
    let report = state.scanner.scan(&request).await?;
    Ok(Json(report))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The scan API server
pub struct ApiServer {
    bind_addr: SocketAddr,
    state: AppState,
}

impl ApiServer {
    pub fn new(bind_addr: SocketAddr, scanner: WebScanner) -> Self {
        Self {
            bind_addr,
            state: AppState::new(scanner),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Bind the configured address and serve until Ctrl+C
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind_addr)
            .await
            .map_err(|source| ServerError::BindFailed {
                addr: self.bind_addr,
                source,
            })?;

        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!("Scan API listening on {}", addr);

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Scan API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bind to {addr} failed: {source}")]
    BindFailed {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
