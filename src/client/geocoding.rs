use crate::config::ApiConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use urlencoding::encode;

/// Minimum spacing between two outbound geocoding requests. The public
/// Nominatim instance asks for at most one request per second.
const COURTESY_INTERVAL: Duration = Duration::from_secs(1);

/// Client for the Nominatim-style geocoding API.
///
/// Successive `search` calls are paced: each call waits until at least
/// [`COURTESY_INTERVAL`] has passed since the previous one started. The
/// pacing only serializes this client's own outbound requests; it never
/// blocks other tools.
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
    last_request: Mutex<Option<Instant>>,
}

impl GeocodingClient {
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
            base_url: config.geocoding_base_url.clone(),
            last_request: Mutex::new(None),
        }
    }

    /// Free-text forward geocoding. `country_code` narrows results to one
    /// country (ISO 3166-1 alpha-2).
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        country_code: Option<&str>,
    ) -> Result<Vec<GeocodingResult>> {
        self.pace().await;
        let mut url = format!(
            "{}/search?q={}&format=json&addressdetails=1&limit={}",
            self.base_url.trim_end_matches('/'),
            encode(query),
            limit,
        );
        if let Some(country_code) = country_code {
            url.push_str(&format!("&countrycodes={}", encode(country_code)));
        }
        let results = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(results)
    }

    /// Waits out the remainder of the courtesy interval, then stamps the
    /// start of this request. Holding the lock across the sleep is what
    /// spaces concurrent callers one interval apart.
    async fn pace(&self) {
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < COURTESY_INTERVAL {
                tokio::time::sleep(COURTESY_INTERVAL - elapsed).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One forward-geocoding hit. Coordinates and the bounding box arrive as
/// strings and are parsed by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub place_id: i64,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<GeocodingAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundingbox: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
