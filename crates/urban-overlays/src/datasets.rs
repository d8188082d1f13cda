use crate::air_quality::{AirQualityData, AIR_QUALITY_PATH};
use crate::population::{PopulationDensity, POPULATION_DENSITY_PATH};
use crate::source::{load_json, AssetSource};
use crate::state::AssetState;

/// Overlay datasets, each loaded once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayDatasets {
    pub population: AssetState<PopulationDensity>,
    /// Sensor readings shared by the air-quality and aerosol overlays.
    pub air_quality: AssetState<AirQualityData>,
}

impl OverlayDatasets {
    /// Load every dataset concurrently. Failures leave that overlay unavailable.
    pub async fn load(source: &dyn AssetSource) -> Self {
        let (population, air_quality) = tokio::join!(
            load_json::<PopulationDensity>(source, POPULATION_DENSITY_PATH),
            load_json::<AirQualityData>(source, AIR_QUALITY_PATH),
        );

        Self {
            population: AssetState::from_result(POPULATION_DENSITY_PATH, population),
            air_quality: AssetState::from_result(AIR_QUALITY_PATH, air_quality),
        }
    }
}
