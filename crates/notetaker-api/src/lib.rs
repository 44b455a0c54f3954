//! notetaker-api - reference backend for the Notetaker REST contract
//!
//! Serves `/api/notes` from an in-memory store. Used by the CLI during
//! development and by the end-to-end tests.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use routes::{app_router, AppState};
pub use store::NoteStore;

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    config: Arc<AppConfig>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = app_router(AppState::from_config(config));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
