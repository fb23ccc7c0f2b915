use crate::error::Result;

use super::dto::{AddressMapInput, AddressMapOutput};

/// Pin a point on the map widget. No upstream call; the widget does the
/// rendering from the echoed coordinates.
pub async fn display_address_map(input: AddressMapInput) -> Result<AddressMapOutput> {
    Ok(AddressMapOutput {
        latitude: input.latitude,
        longitude: input.longitude,
        label: input.label,
        zoom: input.zoom,
    })
}
