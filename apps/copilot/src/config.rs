use std::time::Duration;

use anyhow::{Context, Result};

use crate::gateway::Endpoints;

const DEFAULT_RANKING_URL: &str = "http://localhost:5678/webhook/multipart/form-data";
const DEFAULT_LISTING_URL: &str = "http://localhost:5678/webhook/view-interns";
const DEFAULT_SCHEDULING_URL: &str = "http://localhost:5678/webhook/schedule-interviews";

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub ranking_url: String,
    pub listing_url: String,
    pub scheduling_url: String,
    pub notice_ttl: Duration,
    pub http_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ranking_url: env_or("RANKING_URL", DEFAULT_RANKING_URL),
            listing_url: env_or("LISTING_URL", DEFAULT_LISTING_URL),
            scheduling_url: env_or("SCHEDULING_URL", DEFAULT_SCHEDULING_URL),
            notice_ttl: Duration::from_secs(
                env_or("NOTICE_TTL_SECS", "5")
                    .parse::<u64>()
                    .context("NOTICE_TTL_SECS must be a whole number of seconds")?,
            ),
            http_timeout: Duration::from_secs(
                env_or("HTTP_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            max_upload_bytes: env_or("MAX_UPLOAD_MB", "25")
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?
                * 1024
                * 1024,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            ranking: self.ranking_url.clone(),
            listing: self.listing_url.clone(),
            scheduling: self.scheduling_url.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
