use std::collections::HashSet;

use serde_json::{json, Value};
use transit_mcp::mcp::{dto::McpRequest, handler};
use transit_mcp::{TransitConfig, TransitServer};

fn test_server() -> TransitServer {
    let mut config = TransitConfig::default();
    config.widget.bundle_path = "does/not/exist.js".to_string();
    TransitServer::new(config)
}

fn request(method: &str, params: Option<Value>) -> McpRequest {
    McpRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(1)),
        method: method.to_string(),
        params,
    }
}

const EXPECTED_TOOLS: [&str; 7] = [
    "search_stations",
    "get_departures",
    "get_arrivals",
    "get_journeys",
    "places_nearby",
    "search_address",
    "display_address_map",
];

#[tokio::test]
async fn lists_all_seven_tools_in_order() {
    let server = test_server();
    let resp = handler::handle_request(&server, request("tools/list", None))
        .await
        .expect("tools/list is not a notification");

    let result = resp.result.expect("expected result");
    let tools = result["tools"].as_array().expect("tools array");
    let names: Vec<_> = tools
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, EXPECTED_TOOLS);
}

#[tokio::test]
async fn every_listed_name_resolves_and_none_repeat() {
    let server = test_server();
    let catalog = server.catalog();

    let mut seen = HashSet::new();
    for tool in catalog.list() {
        assert!(catalog.get(tool.name).is_some(), "{} must resolve", tool.name);
        assert!(seen.insert(tool.name), "{} listed twice", tool.name);
    }
    assert_eq!(seen.len(), EXPECTED_TOOLS.len());
}

#[tokio::test]
async fn schemas_advertise_defaults_enums_and_required() {
    let server = test_server();
    let resp = handler::handle_request(&server, request("tools/list", None))
        .await
        .expect("tools/list is not a notification");
    let result = resp.result.expect("expected result");
    let tools = result["tools"].as_array().expect("tools array");

    let departures = tools
        .iter()
        .find(|t| t["name"] == "get_departures")
        .expect("get_departures listed");
    let schema = &departures["inputSchema"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["stop_area_id"]));
    assert_eq!(schema["properties"]["count"]["default"], json!(10));
    assert_eq!(schema["properties"]["depth"]["default"], json!(3));
    assert_eq!(
        schema["properties"]["data_freshness"]["enum"],
        json!(["realtime", "base_schedule"])
    );
    assert_eq!(
        schema["properties"]["data_freshness"]["default"],
        json!("realtime")
    );

    let nearby = tools
        .iter()
        .find(|t| t["name"] == "places_nearby")
        .expect("places_nearby listed");
    let types = &nearby["inputSchema"]["properties"]["types"];
    assert_eq!(types["type"], "array");
    assert_eq!(
        types["items"]["enum"],
        json!(["stop_area", "stop_point", "poi", "address"])
    );
    assert_eq!(types["default"], json!(["stop_area", "stop_point"]));

    let map = tools
        .iter()
        .find(|t| t["name"] == "display_address_map")
        .expect("display_address_map listed");
    let map_required = map["inputSchema"]["required"].as_array().unwrap();
    assert!(map_required.contains(&json!("latitude")));
    assert!(map_required.contains(&json!("longitude")));
    assert_eq!(map["inputSchema"]["properties"]["zoom"]["default"], json!(15));
}

#[tokio::test]
async fn initialize_reports_identity_and_capabilities() {
    let server = test_server();
    let resp = handler::handle_request(&server, request("initialize", None))
        .await
        .expect("initialize is not a notification");

    let result = resp.result.expect("expected result");
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "transit-mcp");
    assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());
}
