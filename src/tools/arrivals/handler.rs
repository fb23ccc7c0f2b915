use serde_json::json;

use crate::client::{StopTimesQuery, TransitApiClient};
use crate::error::{Result, TransitError};
use crate::tools::stop_times::{self, Board};

use super::dto::{ArrivalsInput, ArrivalsOutput};

/// Next arrivals at a stop area. Arrivals are always "from now"; a
/// caller-supplied start time is ignored.
pub async fn get_arrivals(
    client: &TransitApiClient,
    input: ArrivalsInput,
) -> Result<ArrivalsOutput> {
    let query = StopTimesQuery {
        from_datetime: None,
        duration: input.duration,
        count: input.count,
        depth: input.depth,
        data_freshness: input.data_freshness,
    };

    let response =
        stop_times::fetch_with_fallback(client, Board::Arrivals, &input.stop_area_id, query)
            .await?;
    if let Some(error) = &response.error {
        return Err(TransitError::upstream(error.message()));
    }

    let rows = if response.arrivals.is_empty() {
        response.departures
    } else {
        response.arrivals
    };
    let station_name = stop_times::station_name(&rows, &input.stop_area_id);
    Ok(ArrivalsOutput {
        arrivals: rows,
        station_name,
        context: response.context.unwrap_or_else(|| json!({})),
    })
}
