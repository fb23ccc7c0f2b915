//! Shared plumbing for the departures and arrivals boards, including the
//! realtime → base_schedule fallback.

use crate::client::{StopTimeRow, StopTimesQuery, StopTimesResponse, TransitApiClient};
use crate::error::Result;

pub(crate) const REALTIME: &str = "realtime";
pub(crate) const BASE_SCHEDULE: &str = "base_schedule";

/// Window used by the fallback request when the caller gave no duration.
const FALLBACK_DURATION_SECS: i64 = 86_400;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Board {
    Departures,
    Arrivals,
}

impl Board {
    async fn request(
        self,
        client: &TransitApiClient,
        stop_area_id: &str,
        query: &StopTimesQuery,
    ) -> Result<StopTimesResponse> {
        match self {
            Board::Departures => client.departures(stop_area_id, query).await,
            Board::Arrivals => client.arrivals(stop_area_id, query).await,
        }
    }

    /// Result rows for this board. The arrivals endpoint of some
    /// deployments reports its rows under `departures`; both keys count.
    fn rows(self, response: &StopTimesResponse) -> &[StopTimeRow] {
        match self {
            Board::Departures => &response.departures,
            Board::Arrivals => {
                if response.arrivals.is_empty() {
                    &response.departures
                } else {
                    &response.arrivals
                }
            }
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Board::Departures => "departures",
            Board::Arrivals => "arrivals",
        }
    }
}

/// Fetches a board, falling back once from realtime to scheduled data.
///
/// Realtime feeds are frequently sparse for distant or low-traffic
/// stations. A realtime request that returns zero rows is reissued with
/// `base_schedule` and a 24h window when the caller gave no duration. One
/// fallback at most; an explicit `base_schedule` request is never retried,
/// and two empty responses end as an empty result.
pub(crate) async fn fetch_with_fallback(
    client: &TransitApiClient,
    board: Board,
    stop_area_id: &str,
    mut query: StopTimesQuery,
) -> Result<StopTimesResponse> {
    let response = board.request(client, stop_area_id, &query).await?;
    if !board.rows(&response).is_empty() || query.data_freshness != REALTIME {
        return Ok(response);
    }

    tracing::info!(
        "No realtime {} for {}, trying base_schedule",
        board.noun(),
        stop_area_id
    );
    query.data_freshness = BASE_SCHEDULE.to_string();
    query.duration = query.duration.or(Some(FALLBACK_DURATION_SECS));
    board.request(client, stop_area_id, &query).await
}

/// Station display name, lifted from the first row's stop point when the
/// response carries one.
pub(crate) fn station_name(rows: &[StopTimeRow], stop_area_id: &str) -> String {
    rows.first()
        .and_then(|row| row.stop_point.as_ref())
        .and_then(|stop_point| stop_point.name.clone())
        .unwrap_or_else(|| stop_area_id.to_string())
}
