mod config;
mod pgn;
mod routes;
mod source;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::RelayConfig;
use crate::source::{ChessComSource, RelayError};

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = RelayConfig::from_env();
    let source = ChessComSource::new(config.source_url.clone(), config.request_timeout)?;
    let state = routes::AppState::new(Arc::new(source), config.batch_size);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(port = config.port, source = %config.source_url, batch = config.batch_size, "puzzle relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
