use serde::{Deserialize, Serialize};

use crate::client::GeocodingResult;

#[derive(Debug, Deserialize)]
pub struct SearchAddressInput {
    pub query: String,
    pub limit: u32,
    pub country_code: Option<String>,
}

/// Structured geocoding output, camelCased for the consuming client.
#[derive(Debug, Serialize)]
pub struct SearchAddressOutput {
    pub results: Vec<AddressHit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressHit {
    pub place_id: i64,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDetails {
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
}

/// `[minLat, maxLat, minLon, maxLon]`, the order the geocoder uses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl From<GeocodingResult> for AddressHit {
    fn from(result: GeocodingResult) -> Self {
        let bounding_box = parse_bounding_box(&result.boundingbox);
        AddressHit {
            place_id: result.place_id,
            display_name: result.display_name,
            latitude: result.lat.parse().unwrap_or_default(),
            longitude: result.lon.parse().unwrap_or_default(),
            address: result.address.map(|address| AddressDetails {
                house_number: address.house_number,
                road: address.road,
                suburb: address.suburb,
                city: address.city,
                county: address.county,
                state: address.state,
                postcode: address.postcode,
                country: address.country,
                country_code: address.country_code,
            }),
            importance: result.importance,
            bounding_box,
        }
    }
}

fn parse_bounding_box(raw: &[String]) -> Option<BoundingBox> {
    if raw.len() < 4 {
        return None;
    }
    Some(BoundingBox {
        min_lat: raw[0].parse().ok()?,
        max_lat: raw[1].parse().ok()?,
        min_lon: raw[2].parse().ok()?,
        max_lon: raw[3].parse().ok()?,
    })
}
