use serde::{Deserialize, Serialize};
use urban_types::LatLon;

pub const POPULATION_DENSITY_PATH: &str = "/seattle_population_density.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationDensity {
    #[serde(default)]
    pub data: Vec<DensityCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    pub lat: f64,
    pub lng: f64,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityTier {
    Low,
    Medium,
    High,
}

impl DensityCell {
    pub fn center(&self) -> LatLon {
        LatLon::new(self.lat, self.lng)
    }

    /// Marker radius in pixels.
    pub fn radius(&self) -> f64 {
        self.size / 500.0
    }

    pub fn tier(&self) -> DensityTier {
        let radius = self.radius();
        if radius > 8.0 {
            DensityTier::High
        } else if radius > 5.0 {
            DensityTier::Medium
        } else {
            DensityTier::Low
        }
    }
}
