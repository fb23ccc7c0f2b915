use crate::client::{Place, TransitApiClient};
use crate::error::{Result, TransitError};

use super::dto::PlacesNearbyInput;

/// Stations, stops and points of interest around a coordinate.
pub async fn places_nearby(
    client: &TransitApiClient,
    input: PlacesNearbyInput,
) -> Result<String> {
    let response = client
        .places_nearby(&input.coord, input.distance, &input.types, input.count)
        .await?;
    if let Some(error) = &response.error {
        return Err(TransitError::upstream(error.message()));
    }

    if response.places_nearby.is_empty() {
        return Ok(format!(
            "No places found within {}m. 💡 Suggestion: Try increasing the distance \
             parameter (e.g., distance: {}) for rural or less dense areas. Some stations \
             can be 2-5km away from city centers.",
            input.distance,
            input.distance * 2
        ));
    }

    Ok(format_places(&response.places_nearby, input.distance))
}

fn format_places(places: &[Place], distance: u32) -> String {
    let mut output = format!(
        "Found {} place(s) nearby (within {distance}m):\n\n",
        places.len()
    );

    for (index, place) in places.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, place.name));
        output.push_str(&format!(
            "   📍 Distance: {}\n",
            format_distance(place.distance_meters().unwrap_or(0.0))
        ));
        output.push_str(&format!(
            "   🏷️  Type: {}\n",
            place.embedded_type.as_deref().unwrap_or("unknown")
        ));
        output.push_str(&format!("   🆔 ID: {}\n", place.id));

        match place.embedded_type.as_deref() {
            Some("stop_area") => {
                if let Some(stop_area) = &place.stop_area {
                    if let Some(coord) = &stop_area.coord {
                        output.push_str(&format!(
                            "   📌 Coordinates: {}, {}\n",
                            coord.lon, coord.lat
                        ));
                    }
                    let city = stop_area
                        .administrative_regions
                        .iter()
                        .find(|region| region.level == Some(8));
                    if let Some(name) = city.and_then(|region| region.name.as_deref()) {
                        output.push_str(&format!("   🏙️  City: {name}\n"));
                    }
                }
            }
            Some("stop_point") => {
                if let Some(coord) = place.stop_point.as_ref().and_then(|sp| sp.coord.as_ref()) {
                    output.push_str(&format!(
                        "   📌 Coordinates: {}, {}\n",
                        coord.lon, coord.lat
                    ));
                }
            }
            Some("poi") => {
                let category = place
                    .poi
                    .as_ref()
                    .and_then(|poi| poi.poi_type.as_ref())
                    .and_then(|poi_type| poi_type.name.as_deref());
                if let Some(name) = category {
                    output.push_str(&format!("   🏷️  Category: {name}\n"));
                }
            }
            _ => {}
        }

        output.push('\n');
    }

    output.push_str(
        "💡 Tip: Use the ID (e.g., \"stop_area:SNCF:xxxxx\") in get_journeys for optimal routing.",
    );
    output
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}
