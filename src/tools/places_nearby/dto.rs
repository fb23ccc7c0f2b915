use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PlacesNearbyInput {
    /// Canonical `"longitude;latitude"` string, produced by normalization.
    pub coord: String,
    pub distance: u32,
    pub types: Vec<String>,
    pub count: u32,
}
