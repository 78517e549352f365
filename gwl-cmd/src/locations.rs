//! Listing of the location registry.

use gwl_core::{lookup, LocationKey};

/// One line per location: id, full name and map center.
pub fn location_table() -> String {
    LocationKey::ALL
        .iter()
        .filter_map(|key| lookup(*key).ok().map(|info| (key, info)))
        .map(|(key, info)| {
            format!(
                "{:<12} {:<24} {:>8.4}, {:>8.4}",
                key.id(),
                info.full_display_name,
                info.center_latitude,
                info.center_longitude
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_locations() {
    println!("{}", location_table());
}
