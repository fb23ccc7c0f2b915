use crate::client::{Place, TransitApiClient};
use crate::error::{Result, TransitError};

use super::dto::SearchStationsInput;

/// Free-text station search, returned as a formatted text listing.
pub async fn search_stations(
    client: &TransitApiClient,
    input: SearchStationsInput,
) -> Result<String> {
    let query = input.query.trim();
    if query.is_empty() {
        return Err(TransitError::invalid_argument("query parameter is required"));
    }

    let response = client.places(query, &["stop_area"]).await?;
    if let Some(error) = &response.error {
        return Err(TransitError::upstream(error.message()));
    }
    if response.places.is_empty() {
        return Ok(format!("No stations found for \"{query}\""));
    }

    Ok(format_places(&response.places))
}

fn format_places(places: &[Place]) -> String {
    let plural = if places.len() > 1 { "s" } else { "" };
    let mut result = format!("🚉 Stations found ({} result{plural}):\n", places.len());
    result.push_str(&"=".repeat(70));
    result.push_str("\n\n");

    for (index, place) in places.iter().enumerate() {
        result.push_str(&format!("{}. {}\n", index + 1, place.name));
        result.push_str(&format!("   ID: {}\n", place.id));

        if let Some(stop_area) = &place.stop_area {
            let label = stop_area
                .label
                .as_deref()
                .or(stop_area.name.as_deref())
                .unwrap_or(&place.name);
            result.push_str(&format!("   Label: {label}\n"));
            if let Some(coord) = &stop_area.coord {
                result.push_str(&format!("   Coordinates: {}, {}\n", coord.lat, coord.lon));
            }
        }

        if let Some(region) = &place.administrative_region {
            if let Some(name) = &region.name {
                result.push_str(&format!("   Region: {name}\n"));
            }
            if let Some(zip_code) = &region.zip_code {
                result.push_str(&format!("   Postal code: {zip_code}\n"));
            }
        }

        result.push('\n');
    }

    result
}
