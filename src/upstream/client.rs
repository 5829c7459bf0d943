//! HTTP client for the upstream Free Fire data provider.

use std::collections::HashMap;
use std::time::Instant;

use axum::http::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::metrics;
use crate::region::Region;

use super::types::LikeRequest;

/// Client for the upstream Free Fire data provider.
///
/// Holds the per-region base-URL lookup table: regions with a configured
/// override dispatch to their own base, everything else goes to the
/// shared default. The region code is always forwarded as a query
/// parameter as well, since the default upstream multiplexes clusters
/// behind one host.
#[derive(Debug, Clone)]
pub struct FreeFireClient {
    /// HTTP client for upstream requests.
    http: reqwest::Client,
    /// Default base URL for data endpoints.
    default_base: String,
    /// Per-region base URL overrides.
    region_bases: HashMap<Region, String>,
    /// Endpoint for the send-like side effect.
    likes_url: String,
}

impl FreeFireClient {
    /// Create a new upstream client from config with tuned HTTP settings.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(2_000))
            .tcp_nodelay(true)
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(config.http_pool_size)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .expect("failed to create HTTP client");

        // Config::validate rejects malformed overrides before this runs.
        let region_bases = config.region_overrides().unwrap_or_default();

        Self {
            http,
            default_base: config.upstream_base_url.trim_end_matches('/').to_string(),
            region_bases,
            likes_url: config.likes_url.clone(),
        }
    }

    /// Get the HTTP client reference.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Base URL serving the given region.
    pub fn base_for(&self, region: Region) -> &str {
        self.region_bases
            .get(&region)
            .map_or(self.default_base.as_str(), String::as_str)
    }

    /// Get player statistics (matches, wins, kills, K/D).
    #[instrument(skip(self))]
    pub async fn player_stats(&self, region: Region, uid: &str) -> Result<Value, UpstreamError> {
        self.get_json(region, "playerstats", &[("region", region.as_str()), ("uid", uid)])
            .await
    }

    /// Get account information (nickname, level, profile details).
    #[instrument(skip(self))]
    pub async fn account(&self, region: Region, uid: &str) -> Result<Value, UpstreamError> {
        self.get_json(region, "account", &[("region", region.as_str()), ("uid", uid)])
            .await
    }

    /// Get guild information (members, level, details).
    #[instrument(skip(self))]
    pub async fn guild(&self, region: Region, guild_id: &str) -> Result<Value, UpstreamError> {
        self.get_json(
            region,
            "guildInfo",
            &[("region", region.as_str()), ("guildID", guild_id)],
        )
        .await
    }

    /// Get craftland profile (maps and resources).
    #[instrument(skip(self))]
    pub async fn craftland(&self, region: Region, uid: &str) -> Result<Value, UpstreamError> {
        self.get_json(
            region,
            "craftlandProfile",
            &[("region", region.as_str()), ("uid", uid)],
        )
        .await
    }

    /// Send likes to a player. Requires a valid API key.
    #[instrument(skip(self, key))]
    pub async fn send_like(&self, uid: &str, key: &str) -> Result<Value, UpstreamError> {
        let endpoint = "sendLike";
        let start = Instant::now();
        metrics::inc_upstream_requests(endpoint);

        let body = LikeRequest {
            uid: uid.to_string(),
            key: key.to_string(),
        };

        let response = self
            .http
            .post(&self.likes_url)
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                metrics::inc_upstream_failures(endpoint);
                UpstreamError::Request {
                    endpoint: endpoint.to_string(),
                    source,
                }
            })?;

        let value = Self::decode(endpoint, response).await?;
        metrics::record_upstream_latency(start, endpoint);
        metrics::inc_likes_sent();

        Ok(value)
    }

    /// Issue a GET against a data endpoint and pass the JSON through.
    async fn get_json(
        &self,
        region: Region,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}/{}", self.base_for(region), endpoint);
        let start = Instant::now();
        metrics::inc_upstream_requests(endpoint);

        debug!(%url, %region, "Querying upstream");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| {
                metrics::inc_upstream_failures(endpoint);
                UpstreamError::Request {
                    endpoint: endpoint.to_string(),
                    source,
                }
            })?;

        let value = Self::decode(endpoint, response).await?;
        metrics::record_upstream_latency(start, endpoint);

        Ok(value)
    }

    /// Check the status line and decode the JSON body.
    async fn decode(endpoint: &str, response: reqwest::Response) -> Result<Value, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            metrics::inc_upstream_failures(endpoint);
            return Err(UpstreamError::Status {
                endpoint: endpoint.to_string(),
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
            });
        }

        response.json().await.map_err(|e| {
            metrics::inc_upstream_failures(endpoint);
            UpstreamError::Decode {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
