use crate::config::ApiConfig;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use urlencoding::encode;

/// Client for the Navitia-style transit API. One instance is shared by all
/// tool handlers; `reqwest::Client` is internally pooled so cloning is cheap.
///
/// The API reports domain failures (unknown stop area, no coverage, ...) as
/// an `error` member inside an otherwise well-formed JSON body, frequently
/// together with a non-2xx status. The body is therefore parsed regardless
/// of status and the `error` member is surfaced by the handlers, not here.
#[derive(Clone)]
pub struct TransitApiClient {
    http: reqwest::Client,
    base_url: String,
    coverage: String,
    token: Option<String>,
}

/// Query options shared by the departures and arrivals boards.
#[derive(Debug, Clone)]
pub struct StopTimesQuery {
    pub from_datetime: Option<String>,
    pub duration: Option<i64>,
    pub count: u32,
    pub depth: u32,
    pub data_freshness: String,
}

/// Query options for the journey planner.
#[derive(Debug, Clone)]
pub struct JourneysQuery {
    pub from: String,
    pub to: String,
    pub datetime: Option<String>,
    pub datetime_represents: String,
    pub count: u32,
    pub data_freshness: String,
}

impl TransitApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("transit-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: config.transit_base_url.clone(),
            coverage: config.transit_coverage.clone(),
            token: config.transit_token.clone(),
        }
    }

    /// Autocomplete search over places. `types` narrows the result to the
    /// given embedded types (`stop_area`, `address`, ...).
    pub async fn places(&self, query: &str, types: &[&str]) -> Result<PlacesResponse> {
        let mut url = format!("{}?q={}", self.coverage_url("places"), encode(query));
        for place_type in types {
            url.push_str(&format!("&type[]={}", place_type));
        }
        self.fetch(&url).await
    }

    pub async fn departures(
        &self,
        stop_area_id: &str,
        query: &StopTimesQuery,
    ) -> Result<StopTimesResponse> {
        self.stop_times("departures", stop_area_id, query).await
    }

    pub async fn arrivals(
        &self,
        stop_area_id: &str,
        query: &StopTimesQuery,
    ) -> Result<StopTimesResponse> {
        self.stop_times("arrivals", stop_area_id, query).await
    }

    async fn stop_times(
        &self,
        board: &str,
        stop_area_id: &str,
        query: &StopTimesQuery,
    ) -> Result<StopTimesResponse> {
        // Stop area ids contain colons and are legal path segments as-is.
        let mut url = format!(
            "{}?count={}&data_freshness={}&depth={}",
            self.coverage_url(&format!("stop_areas/{}/{}", stop_area_id, board)),
            query.count,
            query.data_freshness,
            query.depth,
        );
        if let Some(from_datetime) = &query.from_datetime {
            url.push_str(&format!("&from_datetime={}", from_datetime));
        }
        if let Some(duration) = query.duration {
            url.push_str(&format!("&duration={}", duration));
        }
        self.fetch(&url).await
    }

    pub async fn journeys(&self, query: &JourneysQuery) -> Result<JourneysResponse> {
        let mut url = format!(
            "{}?from={}&to={}&count={}&datetime_represents={}&data_freshness={}",
            self.coverage_url("journeys"),
            encode(&query.from),
            encode(&query.to),
            query.count,
            query.datetime_represents,
            query.data_freshness,
        );
        if let Some(datetime) = &query.datetime {
            url.push_str(&format!("&datetime={}", datetime));
        }
        self.fetch(&url).await
    }

    /// Places around a canonical `"longitude;latitude"` coordinate.
    pub async fn places_nearby(
        &self,
        coord: &str,
        distance: u32,
        types: &[String],
        count: u32,
    ) -> Result<PlacesNearbyResponse> {
        let mut url = format!(
            "{}?distance={}&count={}",
            self.coverage_url(&format!("coords/{}/places_nearby", coord)),
            distance,
            count,
        );
        for place_type in types {
            url.push_str(&format!("&type[]={}", place_type));
        }
        self.fetch(&url).await
    }

    fn coverage_url(&self, path: &str) -> String {
        format!(
            "{}/coverage/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.coverage,
            path
        )
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }
        let response = request.send().await?;
        Ok(response.json::<T>().await?)
    }
}

/// Domain error member the API embeds in response bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("Unknown error")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coord {
    pub lat: String,
    pub lon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopAreaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub administrative_regions: Vec<AdminRegion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopPointInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi_type: Option<PoiType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One autocomplete or proximity hit. Only the members the formatters and
/// the ranking need are typed; everything else rides along in `extra` so a
/// re-serialized place is the upstream place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_area: Option<StopAreaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_point: Option<StopPointInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi: Option<PoiInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_region: Option<AdminRegion>,
    /// Meters from the query point; the API serializes it as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    pub fn distance_meters(&self) -> Option<f64> {
        match self.distance.as_ref()? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesNearbyResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places_nearby: Vec<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_freshness: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayInformations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of a departures or arrivals board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimeRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_date_time: Option<StopDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_informations: Option<DisplayInformations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_point: Option<StopPointInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimesResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departures: Vec<StopTimeRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arrivals: Vec<StopTimeRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One itinerary. The two ranking keys are typed; the rest of the journey
/// (sections, fares, geojson, ...) is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journey {
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub nb_transfers: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneysResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub journeys: Vec<Journey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
