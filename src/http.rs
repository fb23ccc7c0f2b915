use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::mcp;
use crate::server::TransitServer;

#[derive(Clone)]
struct AppState {
    server: Arc<TransitServer>,
}

/// Full HTTP surface: JSON-RPC on `/` and `/mcp`, health and discovery
/// endpoints, and the static no-auth well-known descriptors.
pub fn build_router(server: Arc<TransitServer>) -> Router {
    let state = AppState { server };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(health).post(handle_rpc))
        .route("/health", get(health))
        .route("/mcp", get(discovery).post(handle_rpc))
        .route(
            "/.well-known/oauth-protected-resource",
            get(oauth_resource).post(oauth_resource),
        )
        .route(
            "/.well-known/oauth-protected-resource/mcp",
            get(oauth_resource).post(oauth_resource),
        )
        .route(
            "/.well-known/*rest",
            get(well_known_not_configured).post(well_known_not_configured),
        )
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// JSON-RPC over HTTP is always 200; error state lives in the envelope.
/// Notifications get a bare `{}` acknowledgement.
async fn handle_rpc(State(state): State<AppState>, body: String) -> Response {
    match mcp::dispatch_raw(&state.server, &body).await {
        Some(response) => Json(response).into_response(),
        None => Json(json!({})).into_response(),
    }
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(state.server.health_payload())
}

async fn discovery(State(state): State<AppState>) -> Json<Value> {
    Json(state.server.discovery_payload())
}

async fn oauth_resource(State(state): State<AppState>) -> Json<Value> {
    Json(state.server.oauth_resource_payload())
}

async fn well_known_not_configured() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not configured",
            "message": "This server does not require authentication"
        })),
    )
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

pub async fn run_http_server(server: TransitServer) -> Result<()> {
    let host = server.config().server.host.clone();
    let port = server.config().server.port;
    let app = build_router(Arc::new(server));

    tracing::info!("Starting HTTP MCP server on {}:{}", host, port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
