pub mod dto;
pub mod handler;

pub use dto::PlacesNearbyInput;
pub use handler::places_nearby;
