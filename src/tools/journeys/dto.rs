use serde::{Deserialize, Serialize};

use crate::client::Journey;

#[derive(Debug, Deserialize)]
pub struct JourneysInput {
    pub from: String,
    pub to: String,
    pub datetime: Option<String>,
    pub datetime_represents: String,
    pub count: u32,
    pub data_freshness: String,
}

/// Payload rendered by the journeys viewer widget. Journeys are ordered
/// fewest transfers first, shortest duration second.
#[derive(Debug, Serialize)]
pub struct JourneysOutput {
    pub journeys: Vec<Journey>,
    pub from: String,
    pub to: String,
}
