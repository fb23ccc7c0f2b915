use serde_json::json;

use crate::client::{StopTimesQuery, TransitApiClient};
use crate::error::{Result, TransitError};
use crate::tools::stop_times::{self, Board};

use super::dto::{DeparturesInput, DeparturesOutput};

/// Next departures from a stop area, realtime when available.
pub async fn get_departures(
    client: &TransitApiClient,
    input: DeparturesInput,
) -> Result<DeparturesOutput> {
    let query = StopTimesQuery {
        from_datetime: input.from_datetime,
        duration: input.duration,
        count: input.count,
        depth: input.depth,
        data_freshness: input.data_freshness,
    };

    let response =
        stop_times::fetch_with_fallback(client, Board::Departures, &input.stop_area_id, query)
            .await?;
    if let Some(error) = &response.error {
        return Err(TransitError::upstream(error.message()));
    }

    let station_name = stop_times::station_name(&response.departures, &input.stop_area_id);
    Ok(DeparturesOutput {
        departures: response.departures,
        station_name,
        context: response.context.unwrap_or_else(|| json!({})),
    })
}
