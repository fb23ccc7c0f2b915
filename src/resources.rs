//! UI resources: HTML widget documents served via `resources/read`.
//!
//! The interactive widgets are a single JS bundle built out-of-tree and
//! inlined verbatim into a static HTML shell. When the bundle file is
//! missing the server degrades gracefully: `resources/list` is empty and
//! tools stop advertising their output templates.

use crate::config::TransitConfig;
use crate::error::{Result, TransitError};
use serde_json::{json, Value};

pub const JOURNEYS_VIEWER_URI: &str = "ui://journeys/viewer.html";
pub const DEPARTURES_VIEWER_URI: &str = "ui://departures/viewer.html";
pub const ARRIVALS_VIEWER_URI: &str = "ui://arrivals/viewer.html";
pub const ADDRESS_MAP_URI: &str = "ui://address/map.html";

/// MIME type MCP clients expect for renderable HTML widgets.
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";

#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub widget_description: &'static str,
}

const DESCRIPTORS: &[ResourceDescriptor] = &[
    ResourceDescriptor {
        uri: JOURNEYS_VIEWER_URI,
        name: "Journeys Viewer",
        description: "Visual interface for journey results",
        widget_description: "Displays an interactive view of the journeys found, with tabs to \
                             compare options and the full details of each leg.",
    },
    ResourceDescriptor {
        uri: DEPARTURES_VIEWER_URI,
        name: "Departures Viewer",
        description: "Visual interface for station departure boards",
        widget_description: "Displays an interactive board of the next departures from a \
                             station, with live delay information.",
    },
    ResourceDescriptor {
        uri: ARRIVALS_VIEWER_URI,
        name: "Arrivals Viewer",
        description: "Visual interface for station arrival boards",
        widget_description: "Displays an interactive board of the next arrivals at a station, \
                             with live delay information.",
    },
    ResourceDescriptor {
        uri: ADDRESS_MAP_URI,
        name: "Address Map",
        description: "Interactive map for a geocoded location",
        widget_description: "Displays an interactive map centered on a location, with a marker \
                             and an optional label.",
    },
];

/// Read-only registry of the UI resources, fixed after start-up.
pub struct UiResources {
    bundle: Option<String>,
    transit_origin: Option<String>,
}

impl UiResources {
    pub fn new(bundle: Option<String>, transit_base_url: &str) -> Self {
        let transit_origin = reqwest::Url::parse(transit_base_url)
            .ok()
            .map(|url| url.origin().ascii_serialization());
        Self {
            bundle,
            transit_origin,
        }
    }

    /// Loads the widget bundle from the configured path, degrading with a
    /// warning when it is absent.
    pub fn load(config: &TransitConfig) -> Self {
        let bundle = match std::fs::read_to_string(&config.widget.bundle_path) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                tracing::warn!(
                    path = %config.widget.bundle_path,
                    "Could not load UI component bundle, widgets disabled: {}",
                    e
                );
                None
            }
        };
        Self::new(bundle, &config.apis.transit_base_url)
    }

    pub fn has_bundle(&self) -> bool {
        self.bundle.is_some()
    }

    /// `resources/list` payload entries. Empty without a bundle.
    pub fn list(&self) -> Vec<Value> {
        if self.bundle.is_none() {
            return Vec::new();
        }
        DESCRIPTORS
            .iter()
            .map(|d| {
                json!({
                    "uri": d.uri,
                    "mimeType": WIDGET_MIME_TYPE,
                    "name": d.name,
                    "description": d.description,
                })
            })
            .collect()
    }

    /// `resources/read` payload for one URI.
    pub fn read(&self, uri: &str) -> Result<Value> {
        let descriptor = DESCRIPTORS.iter().find(|d| d.uri == uri);
        match (descriptor, &self.bundle) {
            (Some(descriptor), Some(bundle)) => Ok(json!({
                "contents": [{
                    "uri": descriptor.uri,
                    "mimeType": WIDGET_MIME_TYPE,
                    "text": render_html(bundle),
                    "_meta": self.widget_meta(descriptor),
                }]
            })),
            _ => Err(TransitError::ResourceNotFound(uri.to_string())),
        }
    }

    fn widget_meta(&self, descriptor: &ResourceDescriptor) -> Value {
        let mut connect_domains = Vec::new();
        if let Some(origin) = &self.transit_origin {
            connect_domains.push(origin.clone());
        }
        connect_domains.extend(TILE_DOMAINS.iter().map(|d| d.to_string()));

        let mut resource_domains = vec!["https://unpkg.com".to_string()];
        resource_domains.extend(TILE_DOMAINS.iter().map(|d| d.to_string()));
        resource_domains.push("https://unpkg.com/leaflet@1.9.4/dist/images".to_string());

        json!({
            "openai/widgetPrefersBorder": true,
            "openai/widgetDomain": "https://chatgpt.com",
            "openai/widgetCSP": {
                "connect_domains": connect_domains,
                "resource_domains": resource_domains,
            },
            "openai/widgetDescription": descriptor.widget_description,
        })
    }
}

const TILE_DOMAINS: &[&str] = &[
    "https://a.tile.openstreetmap.org",
    "https://b.tile.openstreetmap.org",
    "https://c.tile.openstreetmap.org",
];

/// Static HTML shell with the widget bundle inlined as a module script.
fn render_html(bundle: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{ font-family: system-ui, -apple-system, sans-serif; }}
    #root {{ width: 100%; min-height: 100vh; }}
  </style>
</head>
<body>
  <div id="root"></div>
  <script crossorigin src="https://unpkg.com/react@18/umd/react.production.min.js"></script>
  <script crossorigin src="https://unpkg.com/react-dom@18/umd/react-dom.production.min.js"></script>
  <script type="module">
{bundle}
  </script>
</body>
</html>"#
    )
}
