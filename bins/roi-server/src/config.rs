//! Server configuration loaded from environment variables.

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

#[derive(Clone, Debug)]
pub struct Config {
    /// Address to bind the HTTP server.
    pub bind_addr: String,
    /// Public calculator page. Share links are built on this URL.
    pub public_url: Url,
    /// Wait before a lead is handed to the sink.
    pub lead_submit_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("ROI_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let public_url = lookup("ROI_PUBLIC_URL")
            .unwrap_or_else(|| "http://localhost:8080/roi-calculator".to_string());
        let public_url = Url::parse(&public_url)
            .with_context(|| format!("ROI_PUBLIC_URL is not a valid URL: {public_url}"))?;

        let submit_ms: u64 = lookup("ROI_LEAD_SUBMIT_DELAY_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse()
            .context("ROI_LEAD_SUBMIT_DELAY_MS must be a non-negative integer")?;

        Ok(Config {
            bind_addr,
            public_url,
            lead_submit_delay: Duration::from_millis(submit_ms),
        })
    }
}
