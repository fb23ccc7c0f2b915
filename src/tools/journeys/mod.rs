pub mod dto;
pub mod handler;

pub use dto::{JourneysInput, JourneysOutput};
pub use handler::get_journeys;
