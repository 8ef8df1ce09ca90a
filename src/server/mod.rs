//! HTTP server for Pulse

pub mod routes;

pub use routes::{router, AppState};

use std::sync::Arc;
use tracing::info;

use crate::core::Result;

/// Run the HTTP server on the given bind address
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
