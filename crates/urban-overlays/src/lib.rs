pub mod air_quality;
pub mod datasets;
pub mod error;
pub mod population;
pub mod prompts;
pub mod source;
pub mod state;

pub use air_quality::{
    AirQualityData, AqiBand, HeatPoint, Sensor, TrafficLevel, AEROSOL_HEAT_SCALE,
    AIR_QUALITY_HEAT_SCALE, AIR_QUALITY_PATH,
};
pub use datasets::OverlayDatasets;
pub use error::{AssetError, Result};
pub use population::{DensityCell, DensityTier, PopulationDensity, POPULATION_DENSITY_PATH};
pub use prompts::{PromptCatalogue, PromptCategory, PROMPT_CATALOGUE_PATH};
pub use source::{load_json, AssetSource, DirAssetSource, HttpAssetSource};
pub use state::AssetState;
