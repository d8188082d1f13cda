use crate::filters::FilterEntry;
use crate::focus::Focus;
use crate::hover::HoverPopup;
use crate::tabs::{AssistantPane, Tab};
use serde::Serialize;
use urban_overlays::{
    AssetState, OverlayDatasets, PromptCategory, AEROSOL_HEAT_SCALE, AIR_QUALITY_HEAT_SCALE,
};
use urban_types::{ChatMessage, OverlayCategory, PointOfInterest, Recommendation, ScreenPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Unavailable,
}

impl<T> From<&AssetState<T>> for LoadStatus {
    fn from(state: &AssetState<T>) -> Self {
        match state {
            AssetState::Loading => LoadStatus::Loading,
            AssetState::Ready(_) => LoadStatus::Ready,
            AssetState::Unavailable(_) => LoadStatus::Unavailable,
        }
    }
}

/// A visible overlay layer and how many features it draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerView {
    pub category: OverlayCategory,
    pub status: LoadStatus,
    pub features: usize,
}

impl LayerView {
    pub(crate) fn build(category: OverlayCategory, datasets: &OverlayDatasets) -> Self {
        let (status, features) = match category {
            OverlayCategory::PopulationDensity => (
                LoadStatus::from(&datasets.population),
                datasets.population.ready().map_or(0, |p| p.data.len()),
            ),
            OverlayCategory::AirQuality => (
                LoadStatus::from(&datasets.air_quality),
                datasets
                    .air_quality
                    .ready()
                    .map_or(0, |a| a.heat_points(AIR_QUALITY_HEAT_SCALE).len()),
            ),
            OverlayCategory::AerosolOpticalDepth => (
                LoadStatus::from(&datasets.air_quality),
                datasets
                    .air_quality
                    .ready()
                    .map_or(0, |a| a.heat_points(AEROSOL_HEAT_SCALE).len()),
            ),
            _ => (LoadStatus::Unavailable, 0),
        };

        Self {
            category,
            status,
            features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView {
    pub point: PointOfInterest,
    pub anchor: ScreenPoint,
    pub reasons: Vec<String>,
}

impl From<&HoverPopup> for PopupView {
    fn from(popup: &HoverPopup) -> Self {
        Self {
            point: popup.point.clone(),
            anchor: popup.anchor(),
            reasons: popup.top_reasons().to_vec(),
        }
    }
}

/// Everything a view needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub active_tab: Tab,
    pub assistant_pane: AssistantPane,
    /// Every marker on the map.
    pub points: Vec<PointOfInterest>,
    /// The subset listed in the points-of-interest panel.
    pub ai_points: Vec<PointOfInterest>,
    pub focus: Option<Focus>,
    pub panel_width: u32,
    pub filters: Vec<FilterEntry>,
    pub layers: Vec<LayerView>,
    pub popup: Option<PopupView>,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
    pub connected: bool,
    pub recent_prompt: Option<String>,
    pub recommendation_log: Vec<Recommendation>,
    pub catalogue: LoadStatus,
    pub categories: Vec<PromptCategory>,
    pub selected_category: Option<PromptCategory>,
    pub viewport_width: f64,
}
