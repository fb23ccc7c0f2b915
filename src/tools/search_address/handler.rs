use crate::client::GeocodingClient;
use crate::error::{Result, TransitError};

use super::dto::{AddressHit, SearchAddressInput, SearchAddressOutput};

/// Forward geocoding of a free-text address.
pub async fn search_address(
    client: &GeocodingClient,
    input: SearchAddressInput,
) -> Result<SearchAddressOutput> {
    if input.query.trim().is_empty() {
        return Err(TransitError::invalid_argument(
            "Query parameter is required and cannot be empty",
        ));
    }

    let results = client
        .search(&input.query, input.limit, input.country_code.as_deref())
        .await?;

    Ok(SearchAddressOutput {
        results: results.into_iter().map(AddressHit::from).collect(),
    })
}
