//! End-to-end tests for the API router.
//!
//! These run fully offline: a stub upstream server is bound to an
//! ephemeral local port and the router is driven with `oneshot`.

use std::collections::HashMap;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Query;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use freefire_api::api::{create_router, AppState};
use freefire_api::config::Config;
use freefire_api::upstream::FreeFireClient;

/// Bind a stub upstream on an ephemeral port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub upstream");
    let addr = listener.local_addr().expect("stub has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub upstream died");
    });

    format!("http://{addr}")
}

/// Stub data provider echoing the query parameters it received.
fn stub_provider() -> Router {
    async fn echo(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "received": params,
            "nickname": "TestPlayer",
            "level": 62,
            "likes": 100,
        }))
    }

    async fn failing() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
    }

    async fn slow(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(json!({ "received": params }))
    }

    async fn send_like(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "status": "success",
            "uid": body["uid"],
            "likes_added": 100,
        }))
    }

    Router::new()
        .route("/playerstats", get(echo))
        .route("/account", get(echo))
        .route("/guildInfo", get(echo))
        // Craftland doubles as the failure endpoint in the failing tests.
        .route("/craftlandProfile", get(failing))
        .route("/slow/playerstats", get(slow))
        .route("/sendLike", post(send_like))
}

fn config_for(base: &str, ff_api_key: Option<String>) -> Config {
    Config {
        upstream_base_url: base.to_string(),
        region_base_urls: None,
        likes_url: format!("{base}/sendLike"),
        ff_api_key,
        http_timeout_ms: 1_000,
        http_pool_size: 2,
        port: 0,
        rust_log: "info".to_string(),
        verbose: false,
    }
}

fn app_for(config: &Config) -> Router {
    let state = AppState::new(FreeFireClient::new(config), config.ff_api_key.clone());
    create_router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn post_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn player_stats_passes_region_and_uid_upstream() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, None));

    let (status, json) = get_json(app, "/api/player-stats?uid=123456789&region=br").await;

    assert_eq!(status, StatusCode::OK);
    // Region is normalized to its uppercase upstream form.
    assert_eq!(json["received"]["region"], "BR");
    assert_eq!(json["received"]["uid"], "123456789");
}

#[tokio::test]
async fn player_stats_defaults_to_ind_region() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, None));

    let (status, json) = get_json(app, "/api/player-stats?uid=42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["received"]["region"], "IND");
}

#[tokio::test]
async fn account_supports_field_subset() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, None));

    let (status, json) = get_json(app, "/api/account?uid=42&fields=nickname,level").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"nickname": "TestPlayer", "level": 62}));
}

#[tokio::test]
async fn guild_sends_guild_id_parameter() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, None));

    let (status, json) = get_json(app, "/api/guild?guild_id=987&region=sg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["received"]["guildID"], "987");
    assert_eq!(json["received"]["region"], "SG");
}

#[tokio::test]
async fn upstream_error_surfaces_as_bad_gateway() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, None));

    // The stub's craftlandProfile route always answers 500.
    let (status, json) = get_json(app, "/api/craftland?uid=42").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("craftlandProfile"));
}

#[tokio::test]
async fn upstream_timeout_surfaces_as_gateway_timeout() {
    let base = spawn_upstream(stub_provider()).await;
    let mut config = config_for(&base, None);
    config.upstream_base_url = format!("{base}/slow");
    config.http_timeout_ms = 100;
    let app = app_for(&config);

    let (status, _) = get_json(app, "/api/player-stats?uid=42").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn region_override_dispatches_to_its_own_base() {
    // Two stub clusters; BR gets its own base URL.
    let default_base = spawn_upstream(stub_provider()).await;

    async fn br_echo(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({ "cluster": "brazil", "received": params }))
    }
    let br_base =
        spawn_upstream(Router::new().route("/playerstats", get(br_echo))).await;

    let mut config = config_for(&default_base, None);
    config.region_base_urls = Some(format!("BR={br_base}"));
    let app = app_for(&config);

    let (status, json) = get_json(app.clone(), "/api/player-stats?uid=1&region=BR").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cluster"], "brazil");

    // Other regions still hit the default base.
    let (status, json) = get_json(app, "/api/player-stats?uid=1&region=SG").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.get("cluster").is_none());
}

#[tokio::test]
async fn send_likes_uses_per_request_key() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, None));

    let (status, json) = post_json(app, "/api/send-likes?uid=123&api_key=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["uid"], "123");
}

#[tokio::test]
async fn send_likes_falls_back_to_configured_key() {
    let base = spawn_upstream(stub_provider()).await;
    let app = app_for(&config_for(&base, Some("server-key".to_string())));

    let (status, json) = post_json(app, "/api/send-likes?uid=123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
}

#[tokio::test]
async fn send_likes_without_any_key_returns_401() {
    // Unroutable base: a 401 must be produced before any network call.
    let config = config_for("http://127.0.0.1:9", None);
    let app = app_for(&config);

    let (status, json) = post_json(app, "/api/send-likes?uid=123").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["error"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn every_supported_region_is_accepted() {
    let base = spawn_upstream(stub_provider()).await;
    let config = config_for(&base, None);

    for region in freefire_api::region::Region::ALL {
        let app = app_for(&config);
        let uri = format!("/api/player-stats?uid=1&region={region}");
        let (status, json) = get_json(app, &uri).await;

        assert_eq!(status, StatusCode::OK, "region {region} rejected");
        assert_eq!(json["received"]["region"], region.as_str());
    }
}
