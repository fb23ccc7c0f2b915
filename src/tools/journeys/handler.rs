use crate::client::{JourneysQuery, TransitApiClient};
use crate::error::{Result, TransitError};

use super::dto::{JourneysInput, JourneysOutput};

/// Journey planning between two places, ranked by comfort: fewest
/// transfers first, then shortest duration. Ties keep the upstream order.
pub async fn get_journeys(
    client: &TransitApiClient,
    input: JourneysInput,
) -> Result<JourneysOutput> {
    let query = JourneysQuery {
        from: input.from.clone(),
        to: input.to.clone(),
        datetime: input.datetime,
        datetime_represents: input.datetime_represents,
        count: input.count,
        data_freshness: input.data_freshness,
    };

    let response = client.journeys(&query).await?;
    if let Some(error) = &response.error {
        return Err(TransitError::upstream(error.message()));
    }
    if response.journeys.is_empty() {
        return Err(TransitError::no_results("No journeys found"));
    }

    let mut journeys = response.journeys;
    journeys.sort_by_key(|journey| (journey.nb_transfers, journey.duration));

    Ok(JourneysOutput {
        journeys,
        from: input.from,
        to: input.to,
    })
}
