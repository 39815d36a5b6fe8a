//! REST API exposing the sizing calculator.
//!
//! Provides two GET endpoints:
//! - `/profiles`: the built-in business profiles and their loads
//! - `/size`: a sizing report for a profile or manual load

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::sizing::SizingConfiguration;

pub use types::{ErrorResponse, ProfileRecord, SizeQuery};

/// Immutable application state shared across all request handlers.
///
/// Every request sizes independently; the only shared data is the set of
/// assumptions used when a query leaves one out.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Assumptions applied to fields absent from the query.
    pub defaults: SizingConfiguration,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profiles", get(handlers::get_profiles))
        .route("/size", get(handlers::get_size))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "sizing API listening");
    axum::serve(listener, app).await
}
