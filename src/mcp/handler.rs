use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::args;
use crate::catalog::OutputMode;
use crate::error::{ErrorTier, Result, TransitError};
use crate::server::TransitServer;
use crate::tools::{
    display_address_map, get_arrivals, get_departures, get_journeys, places_nearby,
    search_address, search_stations, AddressMapInput, ArrivalsInput, DeparturesInput,
    JourneysInput, PlacesNearbyInput, SearchAddressInput, SearchStationsInput,
};

use super::dto::{McpError, McpRequest, McpResponse, ToolCall, ToolOutcome, INTERNAL_ERROR};

/// Parses one raw JSON-RPC message and dispatches it. `None` means the
/// message was a notification and gets no envelope.
pub async fn dispatch_raw(server: &TransitServer, raw: &str) -> Option<McpResponse> {
    match serde_json::from_str::<McpRequest>(raw) {
        Ok(request) => handle_request(server, request).await,
        Err(parse_error) => Some(protocol_error(recover_id(raw), parse_error)),
    }
}

/// Best-effort id extraction from a body that failed to parse as a
/// request, so the error envelope can still echo it.
fn recover_id(raw: &str) -> Option<Value> {
    serde_json::from_str::<Value>(raw).ok()?.get("id").cloned()
}

pub async fn handle_request(server: &TransitServer, request: McpRequest) -> Option<McpResponse> {
    if request.method.starts_with("notifications/") {
        tracing::debug!("Acknowledged notification: {}", request.method);
        return None;
    }

    let id = request.id;
    let response = match request.method.as_str() {
        "initialize" => success(id, server.initialize_payload()),
        "tools/list" => {
            let with_widgets = server.resources().has_bundle();
            success(id, json!({ "tools": server.catalog().render(with_widgets) }))
        }
        "resources/list" => success(id, json!({ "resources": server.resources().list() })),
        "resources/read" => match read_resource(server, request.params) {
            Ok(contents) => success(id, contents),
            Err(error) => protocol_error(id, error),
        },
        "tools/call" => handle_tool_call(server, id, request.params).await,
        other => protocol_error(id, TransitError::UnknownMethod(other.to_string())),
    };
    Some(response)
}

fn read_resource(server: &TransitServer, params: Option<Value>) -> Result<Value> {
    let uri = params
        .as_ref()
        .and_then(|params| params.get("uri"))
        .and_then(Value::as_str)
        .ok_or_else(|| TransitError::invalid_request("Missing required parameter: uri"))?;
    server.resources().read(uri)
}

async fn handle_tool_call(
    server: &TransitServer,
    id: Option<Value>,
    params: Option<Value>,
) -> McpResponse {
    let call = match params {
        Some(params) => match serde_json::from_value::<ToolCall>(params) {
            Ok(call) => call,
            Err(_) => return protocol_error(id, "Invalid tool call parameters"),
        },
        None => return protocol_error(id, "Missing parameters"),
    };

    tracing::info!("Handling tool call: {}", call.name);

    // The mode shapes error envelopes; captured before execution so an
    // early failure still renders per the tool's contract.
    let mode = server.catalog().get(&call.name).map(|tool| tool.output);
    match execute_tool(server, call).await {
        Ok(outcome) => success(id, render_outcome(outcome)),
        Err(error) => match error.tier() {
            ErrorTier::Tool => success(id, render_tool_error(mode, &error)),
            ErrorTier::Protocol => protocol_error(id, error),
        },
    }
}

/// Catalogue lookup, normalization and handler dispatch for one call.
pub(crate) async fn execute_tool(server: &TransitServer, call: ToolCall) -> Result<ToolOutcome> {
    let tool = server
        .catalog()
        .get(&call.name)
        .ok_or_else(|| TransitError::UnknownTool {
            name: call.name.clone(),
            valid: server.catalog().names(),
        })?;
    let arguments = args::normalize(tool, call.arguments)?;
    run_tool(server, &call.name, arguments).await
}

async fn run_tool(
    server: &TransitServer,
    name: &str,
    arguments: Map<String, Value>,
) -> Result<ToolOutcome> {
    let arguments = Value::Object(arguments);
    match name {
        "search_stations" => {
            let input: SearchStationsInput = parse_input(arguments)?;
            let text = search_stations(server.transit(), input).await?;
            Ok(ToolOutcome::Text(text))
        }
        "get_departures" => {
            let input: DeparturesInput = parse_input(arguments)?;
            let output = get_departures(server.transit(), input).await?;
            Ok(ToolOutcome::Structured(serde_json::to_value(output)?))
        }
        "get_arrivals" => {
            let input: ArrivalsInput = parse_input(arguments)?;
            let output = get_arrivals(server.transit(), input).await?;
            Ok(ToolOutcome::Structured(serde_json::to_value(output)?))
        }
        "get_journeys" => {
            let input: JourneysInput = parse_input(arguments)?;
            let output = get_journeys(server.transit(), input).await?;
            Ok(ToolOutcome::Structured(serde_json::to_value(output)?))
        }
        "places_nearby" => {
            let input: PlacesNearbyInput = parse_input(arguments)?;
            let text = places_nearby(server.transit(), input).await?;
            Ok(ToolOutcome::Text(text))
        }
        "search_address" => {
            let input: SearchAddressInput = parse_input(arguments)?;
            let output = search_address(server.geocoding(), input).await?;
            Ok(ToolOutcome::Structured(serde_json::to_value(output)?))
        }
        "display_address_map" => {
            let input: AddressMapInput = parse_input(arguments)?;
            let output = display_address_map(input).await?;
            Ok(ToolOutcome::Structured(serde_json::to_value(output)?))
        }
        _ => Err(TransitError::UnknownTool {
            name: name.to_string(),
            valid: server.catalog().names(),
        }),
    }
}

fn parse_input<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| TransitError::invalid_argument(format!("Invalid arguments: {e}")))
}

fn render_outcome(outcome: ToolOutcome) -> Value {
    match outcome {
        ToolOutcome::Text(text) => json!({
            "content": [{ "type": "text", "text": text }]
        }),
        ToolOutcome::Structured(payload) => json!({
            "content": [],
            "structuredContent": payload
        }),
    }
}

fn render_tool_error(mode: Option<OutputMode>, error: &TransitError) -> Value {
    let mut result = json!({
        "content": [{ "type": "text", "text": format!("Error: {error}") }],
        "isError": true
    });
    if matches!(
        mode,
        Some(OutputMode::Structured) | Some(OutputMode::Widget { .. })
    ) {
        result["structuredContent"] = Value::Null;
    }
    result
}

fn success(id: Option<Value>, result: Value) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: Some(result),
        error: None,
    }
}

fn protocol_error(id: Option<Value>, message: impl ToString) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(McpError {
            code: INTERNAL_ERROR,
            message: message.to_string(),
            data: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_id_from_half_valid_json() {
        assert_eq!(recover_id(r#"{"id": 7, "method": 12}"#), Some(json!(7)));
        assert_eq!(recover_id("not json at all"), None);
    }

    #[test]
    fn tool_error_for_structured_mode_nulls_structured_content() {
        let error = TransitError::no_results("No journeys found");
        let rendered = render_tool_error(Some(OutputMode::Structured), &error);
        assert_eq!(rendered["isError"], json!(true));
        assert_eq!(rendered["structuredContent"], Value::Null);
        assert_eq!(
            rendered["content"][0]["text"],
            json!("Error: No journeys found")
        );
    }

    #[test]
    fn tool_error_for_text_mode_has_no_structured_content() {
        let error = TransitError::invalid_argument("query parameter is required");
        let rendered = render_tool_error(Some(OutputMode::Text), &error);
        assert_eq!(rendered["isError"], json!(true));
        assert!(rendered.get("structuredContent").is_none());
    }
}
