use crate::resources;
use serde_json::{json, Map, Value};

/// Primitive parameter types a tool schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Boolean,
    StringArray,
}

/// Numeric bounds checked during normalization, with the exact message
/// reported when they fail.
#[derive(Debug, Clone, Copy)]
pub struct RangeCheck {
    pub min: f64,
    pub max: f64,
    pub message: &'static str,
}

/// One named parameter of a tool. Doubles as documentation (rendered into
/// the advertised JSON Schema) and as the normalization table: aliases,
/// defaults, ranges and enumerations are all enforced before a handler
/// ever sees the arguments.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub allowed: Option<&'static [&'static str]>,
    pub aliases: &'static [&'static str],
    pub range: Option<RangeCheck>,
    pub coordinate: bool,
    pub datetime: bool,
}

impl Parameter {
    pub fn required(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
            default: None,
            allowed: None,
            aliases: &[],
            range: None,
            coordinate: false,
            datetime: false,
        }
    }

    pub fn optional(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64, message: &'static str) -> Self {
        self.range = Some(RangeCheck { min, max, message });
        self
    }

    pub fn coordinate(mut self) -> Self {
        self.coordinate = true;
        self
    }

    pub fn datetime(mut self) -> Self {
        self.datetime = true;
        self
    }
}

/// How a tool's result is wrapped into the JSON-RPC response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `content: [{type: "text", text}]`
    Text,
    /// `content: []` plus `structuredContent`
    Structured,
    /// Structured content plus a `ui://` template the client should render.
    Widget { template: &'static str },
}

#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<Parameter>,
    pub output: OutputMode,
    pub invoking: Option<&'static str>,
    pub invoked: Option<&'static str>,
}

impl ToolDefinition {
    /// Renders the parameter table into the JSON-Schema object shape
    /// advertised via `tools/list`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for p in &self.parameters {
            let mut prop = Map::new();
            match p.kind {
                ParamType::String => {
                    prop.insert("type".into(), json!("string"));
                    if let Some(allowed) = p.allowed {
                        prop.insert("enum".into(), json!(allowed));
                    }
                }
                ParamType::Number => {
                    prop.insert("type".into(), json!("number"));
                }
                ParamType::Boolean => {
                    prop.insert("type".into(), json!("boolean"));
                }
                ParamType::StringArray => {
                    prop.insert("type".into(), json!("array"));
                    let mut items = Map::new();
                    items.insert("type".into(), json!("string"));
                    if let Some(allowed) = p.allowed {
                        items.insert("enum".into(), json!(allowed));
                    }
                    prop.insert("items".into(), Value::Object(items));
                }
            }
            prop.insert("description".into(), json!(p.description));
            if let Some(default) = &p.default {
                prop.insert("default".into(), default.clone());
            }
            properties.insert(p.name.to_string(), Value::Object(prop));
            if p.required {
                required.push(p.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Full `tools/list` entry. Widget `_meta` is only attached when the UI
    /// bundle is actually loadable, mirroring the degraded mode without it.
    pub fn render(&self, with_widgets: bool) -> Value {
        let mut tool = json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        });

        if with_widgets {
            if let OutputMode::Widget { template } = self.output {
                let mut meta = Map::new();
                meta.insert("openai/outputTemplate".into(), json!(template));
                if let Some(invoking) = self.invoking {
                    meta.insert("openai/toolInvocation/invoking".into(), json!(invoking));
                }
                if let Some(invoked) = self.invoked {
                    meta.insert("openai/toolInvocation/invoked".into(), json!(invoked));
                }
                tool["_meta"] = Value::Object(meta);
            }
        }

        tool
    }
}

/// The read-only tool registry. Listing order is registration order; names
/// are unique keys.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<ToolDefinition>) -> Self {
        Self { tools }
    }

    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.to_string()).collect()
    }

    pub fn render(&self, with_widgets: bool) -> Vec<Value> {
        self.tools.iter().map(|t| t.render(with_widgets)).collect()
    }
}

const DATA_FRESHNESS_VALUES: &[&str] = &["realtime", "base_schedule"];
const PLACE_TYPE_VALUES: &[&str] = &["stop_area", "stop_point", "poi", "address"];

/// Builds the fixed seven-tool catalogue. Tool names are wire contract and
/// must not change.
pub fn build_catalog() -> ToolCatalog {
    ToolCatalog::new(vec![
        ToolDefinition {
            name: "search_stations",
            description: "Search for train stations using autocomplete. Returns station \
                          names, ids, coordinates, and administrative information.",
            parameters: vec![Parameter::required(
                "query",
                ParamType::String,
                "The search query (station name or city)",
            )],
            output: OutputMode::Text,
            invoking: None,
            invoked: None,
        },
        ToolDefinition {
            name: "get_departures",
            description: "Get next departures from a train station. Returns departure times \
                          (theoretical and real-time), line information, directions, and \
                          platform details.",
            parameters: stop_times_parameters("departures"),
            output: OutputMode::Widget {
                template: resources::DEPARTURES_VIEWER_URI,
            },
            invoking: Some("Fetching next departures..."),
            invoked: Some("Departures found"),
        },
        ToolDefinition {
            name: "get_arrivals",
            description: "Get next arrivals at a train station. Returns arrival times \
                          (theoretical and real-time), line information, origins, and \
                          platform details.",
            parameters: stop_times_parameters("arrivals"),
            output: OutputMode::Widget {
                template: resources::ARRIVALS_VIEWER_URI,
            },
            invoking: Some("Fetching next arrivals..."),
            invoked: Some("Arrivals found"),
        },
        ToolDefinition {
            name: "get_journeys",
            description: "Calculate train journeys between two locations. Returns complete \
                          itineraries with connections, times, platforms, and walking \
                          sections. Supports real-time data. Displays an interactive UI.",
            parameters: vec![
                Parameter::required(
                    "from",
                    ParamType::String,
                    "Origin: station id (from search_stations), address, or coordinates \
                     (longitude;latitude)",
                )
                .with_aliases(&["fromId"])
                .coordinate(),
                Parameter::required(
                    "to",
                    ParamType::String,
                    "Destination: station id (from search_stations), address, or \
                     coordinates (longitude;latitude)",
                )
                .with_aliases(&["toId"])
                .coordinate(),
                Parameter::optional(
                    "datetime",
                    ParamType::String,
                    "Optional: Datetime in format YYYYMMDDTHHMMSS (e.g. 20240101T143000)",
                )
                .with_aliases(&["date"])
                .datetime(),
                Parameter::optional(
                    "datetime_represents",
                    ParamType::String,
                    "Optional: 'departure' or 'arrival' (default: departure)",
                )
                .with_allowed(&["departure", "arrival"])
                .with_default(json!("departure")),
                Parameter::optional(
                    "count",
                    ParamType::Number,
                    "Optional: Number of journeys to retrieve (default: 3)",
                )
                .with_default(json!(3)),
                Parameter::optional(
                    "data_freshness",
                    ParamType::String,
                    "Optional: 'realtime' or 'base_schedule' (default: realtime)",
                )
                .with_allowed(DATA_FRESHNESS_VALUES)
                .with_default(json!("realtime")),
            ],
            output: OutputMode::Widget {
                template: resources::JOURNEYS_VIEWER_URI,
            },
            invoking: Some("Searching for the best journeys..."),
            invoked: Some("Journeys found"),
        },
        ToolDefinition {
            name: "places_nearby",
            description: "Find stations, stops and points of interest around a coordinate. \
                          Returns names, types, ids and distances.",
            parameters: vec![
                Parameter::required(
                    "coord",
                    ParamType::String,
                    "Center of the search: coordinates (longitude;latitude) or an object \
                     with longitude/latitude",
                )
                .coordinate(),
                Parameter::optional(
                    "distance",
                    ParamType::Number,
                    "Optional: Search radius in meters (default: 2000)",
                )
                .with_aliases(&["radius"])
                .with_default(json!(2000)),
                Parameter::optional(
                    "types",
                    ParamType::StringArray,
                    "Optional: Place types to return (default: stop_area, stop_point)",
                )
                .with_allowed(PLACE_TYPE_VALUES)
                .with_default(json!(["stop_area", "stop_point"])),
                Parameter::optional(
                    "count",
                    ParamType::Number,
                    "Optional: Number of places to retrieve (default: 10)",
                )
                .with_default(json!(10)),
            ],
            output: OutputMode::Text,
            invoking: None,
            invoked: None,
        },
        ToolDefinition {
            name: "search_address",
            description: "Search for addresses and places by free-text query. Returns \
                          display names, coordinates and address details.",
            parameters: vec![
                Parameter::required(
                    "query",
                    ParamType::String,
                    "The search query (address, place name, etc.)",
                ),
                Parameter::optional(
                    "limit",
                    ParamType::Number,
                    "Optional: Maximum number of results to return (default: 5)",
                )
                .with_default(json!(5)),
                Parameter::optional(
                    "country_code",
                    ParamType::String,
                    "Optional: Limit search to a country (ISO 3166-1 alpha-2, e.g. 'fr')",
                ),
            ],
            output: OutputMode::Structured,
            invoking: None,
            invoked: None,
        },
        ToolDefinition {
            name: "display_address_map",
            description: "Display an interactive map centered on a coordinate, with a \
                          marker and an optional label.",
            parameters: vec![
                Parameter::required(
                    "latitude",
                    ParamType::Number,
                    "Latitude of the marker in decimal degrees",
                )
                .with_range(-90.0, 90.0, "Latitude must be between -90 and 90 degrees"),
                Parameter::required(
                    "longitude",
                    ParamType::Number,
                    "Longitude of the marker in decimal degrees",
                )
                .with_range(-180.0, 180.0, "Longitude must be between -180 and 180 degrees"),
                Parameter::optional(
                    "label",
                    ParamType::String,
                    "Optional: Label displayed on the marker",
                ),
                Parameter::optional(
                    "zoom",
                    ParamType::Number,
                    "Optional: Map zoom level between 1 and 20 (default: 15)",
                )
                .with_default(json!(15))
                .with_range(1.0, 20.0, "Zoom level must be between 1 and 20"),
            ],
            output: OutputMode::Widget {
                template: resources::ADDRESS_MAP_URI,
            },
            invoking: Some("Preparing the map..."),
            invoked: Some("Map ready"),
        },
    ])
}

/// Departures and arrivals share the same parameter surface; only the
/// wording differs.
fn stop_times_parameters(noun: &'static str) -> Vec<Parameter> {
    let count_description = match noun {
        "arrivals" => "Optional: Number of arrivals to retrieve (default: 10)",
        _ => "Optional: Number of departures to retrieve (default: 10)",
    };
    vec![
        Parameter::required(
            "stop_area_id",
            ParamType::String,
            "The station id (from search_stations)",
        ),
        Parameter::optional(
            "from_datetime",
            ParamType::String,
            "Optional: Start datetime in format YYYYMMDDTHHMMSS (e.g. 20240101T143000)",
        )
        .datetime(),
        Parameter::optional(
            "duration",
            ParamType::Number,
            "Optional: Lookahead window in seconds",
        ),
        Parameter::optional("count", ParamType::Number, count_description).with_default(json!(10)),
        Parameter::optional(
            "depth",
            ParamType::Number,
            "Optional: Level of detail of returned objects (default: 3)",
        )
        .with_default(json!(3)),
        Parameter::optional(
            "data_freshness",
            ParamType::String,
            "Optional: 'realtime' or 'base_schedule' (default: realtime)",
        )
        .with_allowed(DATA_FRESHNESS_VALUES)
        .with_default(json!("realtime")),
    ]
}
