//! HTTP API route definitions.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    self, account, craftland, guild, health, player_stats, root, send_likes, AppState,
};

/// OpenAPI document covering the public endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Free Fire API",
        description = "API wrapper for accessing Free Fire game data including player stats, account info, and guild information"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::player_stats,
        handlers::account,
        handlers::guild,
        handlers::craftland,
        handlers::send_likes,
    ),
    components(schemas(
        handlers::ServiceInfo,
        handlers::EndpointIndex,
        handlers::HealthResponse,
        crate::region::Region,
    ))
)]
pub struct ApiDoc;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Service endpoints
        .route("/", get(root))
        .route("/api/health", get(health))
        // Data endpoints
        .route("/api/player-stats", get(player_stats))
        .route("/api/account", get(account))
        .route("/api/guild", get(guild))
        .route("/api/craftland", get(craftland))
        // Privileged side effect
        .route("/api/send-likes", post(send_likes))
        // Observability
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
