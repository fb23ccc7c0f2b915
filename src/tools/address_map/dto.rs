use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddressMapInput {
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
    pub zoom: f64,
}

/// Echo payload consumed by the map widget. Ranges are enforced during
/// normalization, so a handler invocation always succeeds.
#[derive(Debug, Serialize)]
pub struct AddressMapOutput {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub zoom: f64,
}
