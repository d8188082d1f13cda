use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude pair in degrees.
///
/// Serialized as a `[lat, lon]` array, which is the shape map layers and the
/// recommendation payloads use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for (f64, f64) {
    fn from(value: LatLon) -> Self {
        (value.lat, value.lon)
    }
}

/// Initial center of the map view (Seattle).
pub const MAP_CENTER: LatLon = LatLon::new(47.6062, -122.3321);

/// Coordinate returned for neighborhoods missing from the lookup table.
pub const DEFAULT_NEIGHBORHOOD_CENTER: LatLon = LatLon::new(47.6, -122.3321);

const NEIGHBORHOOD_CENTERS: &[(&str, LatLon)] = &[
    ("1", LatLon::new(47.6, -122.3321)),
    ("2", LatLon::new(47.637, -122.3134)),
    ("3", LatLon::new(47.64, -122.37)),
    ("4", LatLon::new(47.62, -122.35)),
    ("5", LatLon::new(47.65, -122.32)),
    ("6", LatLon::new(47.58, -122.38)),
    ("7", LatLon::new(47.67, -122.29)),
    ("8", LatLon::new(47.61, -122.33)),
    ("9", LatLon::new(47.63, -122.36)),
    ("10", LatLon::new(47.59, -122.31)),
    ("11", LatLon::new(47.66, -122.34)),
    ("12", LatLon::new(47.57, -122.35)),
    ("13", LatLon::new(47.64, -122.28)),
    ("14", LatLon::new(47.62, -122.37)),
    ("15", LatLon::new(47.68, -122.31)),
    ("16", LatLon::new(47.58, -122.32)),
    ("17", LatLon::new(47.65, -122.36)),
    ("18", LatLon::new(47.61, -122.29)),
    ("19", LatLon::new(47.63, -122.33)),
    ("20", LatLon::new(47.59, -122.36)),
];

/// Opaque neighborhood identifier as sent by the recommendation service.
///
/// The service is not consistent about sending ids as numbers or strings, so
/// both are accepted and normalised to their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawNeighborhoodId", into = "String")]
pub struct NeighborhoodId(String);

impl NeighborhoodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NeighborhoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NeighborhoodId> for String {
    fn from(value: NeighborhoodId) -> Self {
        value.0
    }
}

impl From<&str> for NeighborhoodId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNeighborhoodId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawNeighborhoodId> for NeighborhoodId {
    fn from(raw: RawNeighborhoodId) -> Self {
        match raw {
            RawNeighborhoodId::Int(n) => Self(n.to_string()),
            RawNeighborhoodId::Float(f) if f.fract() == 0.0 && f.is_finite() => {
                Self(format!("{}", f as i64))
            }
            RawNeighborhoodId::Float(f) => Self(f.to_string()),
            RawNeighborhoodId::Text(s) => Self(s),
        }
    }
}

/// Resolve a neighborhood id to its center coordinate.
///
/// Unknown ids never fail; they resolve to [`DEFAULT_NEIGHBORHOOD_CENTER`].
pub fn resolve_neighborhood(id: &NeighborhoodId) -> LatLon {
    NEIGHBORHOOD_CENTERS
        .iter()
        .find(|(key, _)| *key == id.as_str())
        .map(|(_, center)| *center)
        .unwrap_or(DEFAULT_NEIGHBORHOOD_CENTER)
}
