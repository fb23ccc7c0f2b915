use serde_json::{json, Value};

use crate::catalog::{build_catalog, ToolCatalog};
use crate::client::{GeocodingClient, TransitApiClient};
use crate::config::TransitConfig;
use crate::resources::UiResources;

pub const SERVICE_NAME: &str = "transit-mcp";
pub const SERVICE_DESCRIPTION: &str = "Transit journeys, timetables and geocoding over MCP";

/// Immutable collaborators wired once at start-up and shared read-only by
/// every request.
pub struct TransitServer {
    config: TransitConfig,
    catalog: ToolCatalog,
    resources: UiResources,
    transit: TransitApiClient,
    geocoding: GeocodingClient,
}

impl TransitServer {
    pub fn new(config: TransitConfig) -> Self {
        let catalog = build_catalog();
        let resources = UiResources::load(&config);
        let transit = TransitApiClient::new(&config.apis);
        let geocoding = GeocodingClient::new(&config.apis);
        Self {
            config,
            catalog,
            resources,
            transit,
            geocoding,
        }
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn resources(&self) -> &UiResources {
        &self.resources
    }

    pub fn transit(&self) -> &TransitApiClient {
        &self.transit
    }

    pub fn geocoding(&self) -> &GeocodingClient {
        &self.geocoding
    }

    pub fn initialize_payload(&self) -> Value {
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    pub fn discovery_payload(&self) -> Value {
        json!({
            "name": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "description": SERVICE_DESCRIPTION,
            "protocol": "mcp/1.0",
            "capabilities": {
                "tools": true,
                "resources": true
            }
        })
    }

    pub fn health_payload(&self) -> Value {
        json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "description": SERVICE_DESCRIPTION
        })
    }

    /// Static descriptor for `/.well-known/oauth-protected-resource`:
    /// this server runs without authentication.
    pub fn oauth_resource_payload(&self) -> Value {
        let resource = self
            .config
            .server
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.config.server.port));
        json!({
            "resource": resource,
            "authorization_servers": [],
            "resource_documentation": format!("{}/mcp", resource),
            "scopes_supported": []
        })
    }
}
