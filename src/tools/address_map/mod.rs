pub mod dto;
pub mod handler;

pub use dto::{AddressMapInput, AddressMapOutput};
pub use handler::display_address_map;
