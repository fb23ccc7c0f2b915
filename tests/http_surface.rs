use std::sync::Arc;

use serde_json::{json, Value};
use transit_mcp::http::build_router;
use transit_mcp::{TransitConfig, TransitServer};

async fn spawn_app() -> String {
    let mut config = TransitConfig::default();
    config.widget.bundle_path = "does/not/exist.js".to_string();
    let app = build_router(Arc::new(TransitServer::new(config)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_is_served_on_root_and_health() {
    let base = spawn_app().await;
    for path in ["/", "/health"] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "transit-mcp");
        assert!(body["description"].is_string());
    }
}

#[tokio::test]
async fn discovery_describes_the_server() {
    let base = spawn_app().await;
    let body: Value = reqwest::get(format!("{base}/mcp"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["name"], "transit-mcp");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["protocol"], "mcp/1.0");
    assert_eq!(body["capabilities"]["tools"], json!(true));
    assert_eq!(body["capabilities"]["resources"], json!(true));
}

#[tokio::test]
async fn rpc_is_accepted_on_root_and_mcp() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let request = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"});

    for path in ["/", "/mcp"] {
        let body: Value = client
            .post(format!("{base}{path}"))
            .json(&request)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], json!(1));
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
        assert!(body.get("error").is_none());
    }
}

#[tokio::test]
async fn notifications_are_acknowledged_with_an_empty_object() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/mcp"))
        .json(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn protocol_errors_still_ride_http_200() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/"))
        .body("{broken")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "error state lives in the envelope");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], json!(-32603));
    assert_eq!(body["id"], Value::Null);

    let resp = client
        .post(format!("{base}/mcp"))
        .json(&json!({"jsonrpc": "2.0", "id": 9, "method": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], json!(9));
    assert_eq!(body["error"]["message"], "Unknown method: nope");
}

#[tokio::test]
async fn oauth_descriptors_declare_no_auth() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    for path in [
        "/.well-known/oauth-protected-resource",
        "/.well-known/oauth-protected-resource/mcp",
    ] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["resource"], "http://localhost:3000");
        assert_eq!(body["authorization_servers"], json!([]));
        assert_eq!(body["scopes_supported"], json!([]));
    }

    // POST works on the descriptors too.
    let resp = client
        .post(format!("{base}/.well-known/oauth-protected-resource"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = reqwest::get(format!("{base}/.well-known/openid-configuration"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Not configured");
    assert_eq!(
        body["message"],
        "This server does not require authentication"
    );
}

#[tokio::test]
async fn unknown_paths_get_a_json_404() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/mcp"))
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
