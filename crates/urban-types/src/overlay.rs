use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overlay categories a user can toggle in the filter panel.
///
/// The declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayCategory {
    PopulationDensity,
    AirQuality,
    WaterQuality,
    PublicTransportation,
    FloodRisk,
    AerosolOpticalDepth,
}

impl OverlayCategory {
    pub const COUNT: usize = 6;

    pub const ALL: [OverlayCategory; Self::COUNT] = [
        OverlayCategory::PopulationDensity,
        OverlayCategory::AirQuality,
        OverlayCategory::WaterQuality,
        OverlayCategory::PublicTransportation,
        OverlayCategory::FloodRisk,
        OverlayCategory::AerosolOpticalDepth,
    ];

    /// Position in the filter panel.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PopulationDensity => "Population Density",
            Self::AirQuality => "Air Quality",
            Self::WaterQuality => "Water Quality",
            Self::PublicTransportation => "Public Transportation",
            Self::FloodRisk => "Flood Risk",
            Self::AerosolOpticalDepth => "Aerosol Optical Depth",
        }
    }

    /// Whether a dataset exists to draw for this category.
    pub fn has_dataset(self) -> bool {
        matches!(
            self,
            Self::PopulationDensity | Self::AirQuality | Self::AerosolOpticalDepth
        )
    }
}

impl fmt::Display for OverlayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OverlayCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "population_density" | "population" => Ok(Self::PopulationDensity),
            "air_quality" | "air" => Ok(Self::AirQuality),
            "water_quality" | "water" => Ok(Self::WaterQuality),
            "public_transportation" | "transit" => Ok(Self::PublicTransportation),
            "flood_risk" | "flood" => Ok(Self::FloodRisk),
            "aerosol_optical_depth" | "aod" => Ok(Self::AerosolOpticalDepth),
            _ => Err(format!("Unknown overlay category: {}", s)),
        }
    }
}
