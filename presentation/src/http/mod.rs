//! HTTP API
//!
//! | Route | Description |
//! |-------|-------------|
//! | `POST /api/gemini/dua` | Generate a dua for `{"query": "..."}` |
//! | `GET /health` | Liveness and version |

mod error;
mod handlers;
mod router;

pub use error::ApiError;
pub use router::create_router;

use duaonai_application::{GenerateDuaUseCase, GenerationParams};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<GenerateDuaUseCase>,
    pub params: GenerationParams,
}

impl AppState {
    pub fn new(use_case: GenerateDuaUseCase, params: GenerationParams) -> Self {
        Self {
            use_case: Arc::new(use_case),
            params,
        }
    }
}

/// Per-IP token bucket: one request every `per_seconds`, bursts up to `burst`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_seconds: u64,
    pub burst: u32,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid rate limit: {0:?}")]
    InvalidRateLimit(RateLimit),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind `addr` and serve `router` until Ctrl-C
pub async fn serve(router: axum::Router, addr: &str) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    let local = listener.local_addr()?;

    info!("Server listening on http://{}", local);
    info!("  Health check: http://{}/health", local);
    info!("  Dua API:      POST http://{}/api/gemini/dua", local);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
