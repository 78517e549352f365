use crate::error::ConfigurationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Latitude span of the initial map region, identical for every location.
const SPAN_LATITUDE: f64 = 0.0922;
/// Longitude span of the initial map region, identical for every location.
const SPAN_LONGITUDE: f64 = 0.0421;

/// A monitored groundwater location.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKey {
    Bhubaneswar,
    Jaipur,
    Nagpur,
}

/// Display metadata and map region for a location.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct LocationInfo {
    pub display_name: &'static str,
    pub region: &'static str,
    /// "City, State" as shown in headers
    pub full_display_name: &'static str,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub span_latitude: f64,
    pub span_longitude: f64,
}

static REGISTRY: [(LocationKey, LocationInfo); 3] = [
    (
        LocationKey::Bhubaneswar,
        LocationInfo {
            display_name: "Bhubaneswar",
            region: "Odisha",
            full_display_name: "Bhubaneswar, Odisha",
            center_latitude: 20.2961,
            center_longitude: 85.8245,
            span_latitude: SPAN_LATITUDE,
            span_longitude: SPAN_LONGITUDE,
        },
    ),
    (
        LocationKey::Jaipur,
        LocationInfo {
            display_name: "Jaipur",
            region: "Rajasthan",
            full_display_name: "Jaipur, Rajasthan",
            center_latitude: 26.9124,
            center_longitude: 75.7873,
            span_latitude: SPAN_LATITUDE,
            span_longitude: SPAN_LONGITUDE,
        },
    ),
    (
        LocationKey::Nagpur,
        LocationInfo {
            display_name: "Nagpur",
            region: "Maharashtra",
            full_display_name: "Nagpur, Maharashtra",
            center_latitude: 21.1458,
            center_longitude: 79.0882,
            span_latitude: SPAN_LATITUDE,
            span_longitude: SPAN_LONGITUDE,
        },
    ),
];

impl LocationKey {
    /// Every supported location, in display order.
    pub const ALL: [LocationKey; 3] = [
        LocationKey::Bhubaneswar,
        LocationKey::Jaipur,
        LocationKey::Nagpur,
    ];

    /// Short identifier used on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            LocationKey::Bhubaneswar => "bhubaneswar",
            LocationKey::Jaipur => "jaipur",
            LocationKey::Nagpur => "nagpur",
        }
    }

    /// Value of the `source` query parameter understood by the service.
    pub fn source(&self) -> &'static str {
        match self {
            LocationKey::Bhubaneswar => "bhubaneswar_odisha.csv",
            LocationKey::Jaipur => "jaipur_rajasthan.csv",
            LocationKey::Nagpur => "nagpur_maharashtra.csv",
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LocationKey {
    type Err = ConfigurationError;

    /// Accepts either the short id or the service `source` value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LocationKey::ALL
            .into_iter()
            .find(|key| key.id() == wanted || key.source() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownLocation(s.trim().to_string()))
    }
}

/// Look up display metadata for a location.
pub fn lookup(key: LocationKey) -> Result<&'static LocationInfo, ConfigurationError> {
    REGISTRY
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, info)| info)
        .ok_or(ConfigurationError::Unregistered(key.id()))
}
