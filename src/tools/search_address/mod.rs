pub mod dto;
pub mod handler;

pub use dto::{AddressDetails, AddressHit, BoundingBox, SearchAddressInput, SearchAddressOutput};
pub use handler::search_address;
