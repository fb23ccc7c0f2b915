pub mod address_map;
pub mod arrivals;
pub mod departures;
pub mod journeys;
pub mod places_nearby;
pub mod search_address;
pub mod search_stations;

mod stop_times;

pub use address_map::{display_address_map, AddressMapInput, AddressMapOutput};
pub use arrivals::{get_arrivals, ArrivalsInput, ArrivalsOutput};
pub use departures::{get_departures, DeparturesInput, DeparturesOutput};
pub use journeys::{get_journeys, JourneysInput, JourneysOutput};
pub use places_nearby::{places_nearby, PlacesNearbyInput};
pub use search_address::{search_address, AddressHit, SearchAddressInput, SearchAddressOutput};
pub use search_stations::{search_stations, SearchStationsInput};
