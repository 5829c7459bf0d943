//! Application configuration loaded from environment variables.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::region::Region;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Upstream Endpoints ===
    /// Default base URL for the upstream data provider.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// Per-region base URL overrides, e.g. `IND=https://a;BR=https://b`.
    /// Regions without an override use `upstream_base_url`.
    #[serde(default)]
    pub region_base_urls: Option<String>,

    /// Endpoint for the send-like side effect.
    #[serde(default = "default_likes_url")]
    pub likes_url: String,

    // === Credentials ===
    /// API key for the send-like endpoint (optional; callers may also
    /// pass one per request).
    #[serde(default)]
    pub ff_api_key: Option<String>,

    // === HTTP Client ===
    /// Upstream request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Connection pool size per upstream host.
    #[serde(default = "default_http_pool_size")]
    pub http_pool_size: usize,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_upstream_base_url() -> String {
    "https://free-ff-api-src-5plp.onrender.com/api/v1".to_string()
}

fn default_likes_url() -> String {
    "https://ff-garena.run.place/sendLike".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_http_pool_size() -> usize {
    10
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.upstream_base_url.starts_with("http") {
            return Err("UPSTREAM_BASE_URL must be an http(s) URL".to_string());
        }

        if !self.likes_url.starts_with("http") {
            return Err("LIKES_URL must be an http(s) URL".to_string());
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        self.region_overrides()?;

        Ok(())
    }

    /// Parse `region_base_urls` into the per-region lookup table.
    ///
    /// Entries are `REGION=url` pairs separated by `;`. Empty entries are
    /// skipped so a trailing separator is harmless.
    pub fn region_overrides(&self) -> Result<HashMap<Region, String>, String> {
        let mut overrides = HashMap::new();

        let Some(raw) = self.region_base_urls.as_deref() else {
            return Ok(overrides);
        };

        for entry in raw.split(';').filter(|e| !e.trim().is_empty()) {
            let (code, url) = entry
                .split_once('=')
                .ok_or_else(|| format!("REGION_BASE_URLS entry {entry:?} is not REGION=url"))?;

            let region = Region::from_str(code.trim())
                .map_err(|_| format!("REGION_BASE_URLS names unknown region {:?}", code.trim()))?;

            let url = url.trim();
            if !url.starts_with("http") {
                return Err(format!("REGION_BASE_URLS url for {region} must be http(s)"));
            }

            overrides.insert(region, url.trim_end_matches('/').to_string());
        }

        Ok(overrides)
    }

    /// Whether the send-like endpoint has a server-side key available.
    pub fn has_api_key(&self) -> bool {
        self.ff_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
