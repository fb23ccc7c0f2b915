pub mod dto;
pub mod handler;

pub use dto::SearchStationsInput;
pub use handler::search_stations;
