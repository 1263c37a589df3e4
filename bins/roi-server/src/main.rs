//! roi-server — HTTP JSON API for the AP savings calculator.
//!
//! Serves calculation, share-link, benchmark and lead-capture endpoints under
//! `/api`. Inputs travel as the same query string the calculator page keeps in
//! its address bar.

use std::sync::Arc;

use anyhow::{Context, Result};
use roi_calc::SavingsEngine;
use roi_session::{LeadSink, LoggingLeadSink};
use tracing::info;

mod config;
mod routes;

use config::Config;

/// Shared application state passed to every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: SavingsEngine,
    /// Where captured leads are delivered.
    pub sink: Arc<dyn LeadSink>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load server configuration")?;

    info!(
        bind = %config.bind_addr,
        public_url = %config.public_url,
        lead_submit_delay_ms = config.lead_submit_delay.as_millis() as u64,
        "Starting roi-server"
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        engine: SavingsEngine::new(),
        sink: Arc::new(LoggingLeadSink),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
