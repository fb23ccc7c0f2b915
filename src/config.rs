use crate::error::{Result, TransitError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    pub server: ServerConfig,
    pub apis: ApiConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub transport: String, // "stdio" or "http"
    /// Public base URL, used only in discovery payloads.
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub transit_base_url: String,
    pub transit_coverage: String,
    pub transit_token: Option<String>,
    pub geocoding_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub bundle_path: String,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                log_level: "info".to_string(),
                transport: "stdio".to_string(),
                public_url: None,
            },
            apis: ApiConfig {
                transit_base_url: "https://api.sncf.com/v1".to_string(),
                transit_coverage: "sncf".to_string(),
                transit_token: None,
                geocoding_base_url: "https://nominatim.openstreetmap.org".to_string(),
            },
            widget: WidgetConfig {
                bundle_path: "web/dist/component.js".to_string(),
            },
        }
    }
}

impl TransitConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| TransitError::config_error("Invalid PORT"))?;
        }

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }

        if let Ok(url) = std::env::var("SERVER_URL") {
            if !url.trim().is_empty() {
                config.server.public_url = Some(url);
            }
        }

        if let Ok(log_level) = std::env::var("TRANSIT_MCP_LOG_LEVEL") {
            config.server.log_level = log_level;
        }

        if let Ok(transport) = std::env::var("TRANSIT_MCP_TRANSPORT") {
            config.server.transport = transport;
        }

        if let Ok(base) = std::env::var("TRANSIT_API_BASE_URL") {
            config.apis.transit_base_url = base;
        }

        if let Ok(coverage) = std::env::var("TRANSIT_API_COVERAGE") {
            config.apis.transit_coverage = coverage;
        }

        config.apis.transit_token = std::env::var("TRANSIT_API_TOKEN").ok();

        if let Ok(base) = std::env::var("GEOCODING_BASE_URL") {
            config.apis.geocoding_base_url = base;
        }

        if let Ok(path) = std::env::var("WIDGET_BUNDLE_PATH") {
            config.widget.bundle_path = path;
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TransitError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: TransitConfig = toml::from_str(&content).map_err(|e| {
            TransitError::config_error(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }
}
