//! HTTP API handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::region::Region;
use crate::upstream::FreeFireClient;

/// Service name reported by the root and health endpoints.
pub const SERVICE_NAME: &str = "Free Fire API";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream data provider client.
    pub client: Arc<FreeFireClient>,
    /// Server-side API key for the send-likes endpoint.
    pub ff_api_key: Option<String>,
    /// Prometheus exposition handle, when a recorder is installed.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around an upstream client.
    pub fn new(client: FreeFireClient, ff_api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(client),
            ff_api_key,
            metrics_handle: None,
        }
    }

    /// Attach a Prometheus handle for the /metrics endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

/// Query parameters for player-keyed endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PlayerQuery {
    /// Free Fire player UID.
    pub uid: String,
    /// Region code (default: IND).
    pub region: Option<String>,
    /// Comma-separated top-level fields to keep in the response.
    pub fields: Option<String>,
}

/// Query parameters for the guild endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GuildQuery {
    /// Free Fire guild ID.
    pub guild_id: String,
    /// Region code (default: IND).
    pub region: Option<String>,
    /// Comma-separated top-level fields to keep in the response.
    pub fields: Option<String>,
}

/// Query parameters for the send-likes endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LikeQuery {
    /// Player UID to send likes to.
    pub uid: String,
    /// API key; falls back to the FF_API_KEY environment variable.
    pub api_key: Option<String>,
}

/// Root endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    /// Service banner.
    pub message: String,
    /// Crate version.
    pub version: &'static str,
    /// Route map for discovery.
    pub endpoints: EndpointIndex,
    /// Region codes accepted by the data endpoints.
    pub supported_regions: Vec<&'static str>,
}

/// Route map listed by the root endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointIndex {
    /// Player statistics endpoint.
    pub player_stats: &'static str,
    /// Account info endpoint.
    pub account_info: &'static str,
    /// Guild info endpoint.
    pub guild_info: &'static str,
    /// Craftland profile endpoint.
    pub craftland: &'static str,
    /// Send likes endpoint.
    pub send_likes: &'static str,
    /// Swagger UI.
    pub docs: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
}

/// Parse an optional region query parameter, defaulting to IND.
fn parse_region(code: Option<&str>) -> Result<Region, ApiError> {
    let Some(code) = code else {
        return Ok(Region::default());
    };

    Region::from_str(code).map_err(|_| ApiError::UnsupportedRegion {
        code: code.to_string(),
        supported: Region::supported_list(),
    })
}

/// Keep only the requested top-level keys of an object response.
///
/// `fields` is a comma-separated key list; unknown keys are dropped
/// silently and non-object payloads pass through unchanged.
fn select_fields(value: Value, fields: Option<&str>) -> Value {
    let Some(fields) = fields else {
        return value;
    };

    let Value::Object(mut map) = value else {
        return value;
    };

    let wanted: Vec<&str> = fields
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    if wanted.is_empty() {
        return Value::Object(map);
    }

    let mut subset = serde_json::Map::new();
    for key in wanted {
        if let Some(v) = map.remove(key) {
            subset.insert(key.to_string(), v);
        }
    }

    Value::Object(subset)
}

/// Root endpoint with service information.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service info", body = ServiceInfo))
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: format!("{SERVICE_NAME} - Rust Edition"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointIndex {
            player_stats: "/api/player-stats",
            account_info: "/api/account",
            guild_info: "/api/guild",
            craftland: "/api/craftland",
            send_likes: "/api/send-likes",
            docs: "/docs",
        },
        supported_regions: Region::ALL.iter().map(Region::as_str).collect(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// Get player statistics (matches, wins, kills, K/D).
#[utoipa::path(
    get,
    path = "/api/player-stats",
    params(PlayerQuery),
    responses(
        (status = 200, description = "Player statistics"),
        (status = 400, description = "Unsupported region"),
        (status = 502, description = "Upstream failure")
    )
)]
pub async fn player_stats(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Value>, ApiError> {
    let region = parse_region(query.region.as_deref())?;
    let payload = state.client.player_stats(region, &query.uid).await?;

    Ok(Json(select_fields(payload, query.fields.as_deref())))
}

/// Get account information (nickname, level, profile details).
#[utoipa::path(
    get,
    path = "/api/account",
    params(PlayerQuery),
    responses(
        (status = 200, description = "Account information"),
        (status = 400, description = "Unsupported region"),
        (status = 502, description = "Upstream failure")
    )
)]
pub async fn account(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Value>, ApiError> {
    let region = parse_region(query.region.as_deref())?;
    let payload = state.client.account(region, &query.uid).await?;

    Ok(Json(select_fields(payload, query.fields.as_deref())))
}

/// Get guild information (members, level, details).
#[utoipa::path(
    get,
    path = "/api/guild",
    params(GuildQuery),
    responses(
        (status = 200, description = "Guild information"),
        (status = 400, description = "Unsupported region"),
        (status = 502, description = "Upstream failure")
    )
)]
pub async fn guild(
    State(state): State<AppState>,
    Query(query): Query<GuildQuery>,
) -> Result<Json<Value>, ApiError> {
    let region = parse_region(query.region.as_deref())?;
    let payload = state.client.guild(region, &query.guild_id).await?;

    Ok(Json(select_fields(payload, query.fields.as_deref())))
}

/// Get craftland profile (maps and resources).
#[utoipa::path(
    get,
    path = "/api/craftland",
    params(PlayerQuery),
    responses(
        (status = 200, description = "Craftland profile"),
        (status = 400, description = "Unsupported region"),
        (status = 502, description = "Upstream failure")
    )
)]
pub async fn craftland(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Value>, ApiError> {
    let region = parse_region(query.region.as_deref())?;
    let payload = state.client.craftland(region, &query.uid).await?;

    Ok(Json(select_fields(payload, query.fields.as_deref())))
}

/// Send likes to a player. Requires an API key.
#[utoipa::path(
    post,
    path = "/api/send-likes",
    params(LikeQuery),
    responses(
        (status = 200, description = "Likes sent"),
        (status = 401, description = "No API key configured"),
        (status = 502, description = "Upstream failure")
    )
)]
pub async fn send_likes(
    State(state): State<AppState>,
    Query(query): Query<LikeQuery>,
) -> Result<Json<Value>, ApiError> {
    let key = query
        .api_key
        .filter(|k| !k.is_empty())
        .or_else(|| state.ff_api_key.clone().filter(|k| !k.is_empty()))
        .ok_or(ApiError::MissingApiKey)?;

    let payload = state.client.send_like(&query.uid, &key).await?;

    Ok(Json(payload))
}

/// Prometheus exposition endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed\n".to_string(),
        ),
    }
}
