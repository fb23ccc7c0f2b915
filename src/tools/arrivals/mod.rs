pub mod dto;
pub mod handler;

pub use dto::{ArrivalsInput, ArrivalsOutput};
pub use handler::get_arrivals;
