use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::StopTimeRow;

#[derive(Debug, Deserialize)]
pub struct ArrivalsInput {
    pub stop_area_id: String,
    pub duration: Option<i64>,
    pub count: u32,
    pub depth: u32,
    pub data_freshness: String,
}

/// Payload rendered by the arrivals board widget.
#[derive(Debug, Serialize)]
pub struct ArrivalsOutput {
    pub arrivals: Vec<StopTimeRow>,
    #[serde(rename = "stationName")]
    pub station_name: String,
    pub context: Value,
}
