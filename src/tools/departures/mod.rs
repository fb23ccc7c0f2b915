pub mod dto;
pub mod handler;

pub use dto::{DeparturesInput, DeparturesOutput};
pub use handler::get_departures;
