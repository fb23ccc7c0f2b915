pub mod geocoding;
pub mod transit;

pub use geocoding::{GeocodingAddress, GeocodingClient, GeocodingResult};
pub use transit::{
    ApiError, Journey, JourneysQuery, JourneysResponse, Place, PlacesNearbyResponse,
    PlacesResponse, StopTimeRow, StopTimesQuery, StopTimesResponse, TransitApiClient,
};
