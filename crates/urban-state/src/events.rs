use crate::session::PromptOutcome;
use crate::tabs::Tab;
use urban_overlays::{AssetState, OverlayDatasets, PromptCatalogue};
use urban_types::{HealthResponse, OverlayCategory, ScreenPoint};

/// User interactions forwarded by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Marker or list-row click. List rows carry no pointer position.
    PointClicked { id: String, click_x: Option<f64> },
    PanelDismissed,
    FilterToggled { category: OverlayCategory, enabled: bool },
    TabSelected(Tab),
    PointHovered { id: String, cursor: ScreenPoint },
    PointLeft,
    InputChanged(String),
    PromptSubmitted,
    CancelPrompt,
    ShowPromptSelector,
    ShowChat,
    CategorySelected(usize),
    BackToCategories,
    PromptPicked(usize),
    RetryConnection,
    ClearHistory,
    ResetAiRecommendations,
    /// Transcript recommendation click, carrying the map point id it built
    /// (see `Recommendation::point_id`).
    RecommendationActivated(String),
    ViewportResized(f64),
    Shutdown,
}

/// Results of spawned I/O, fed back into the event loop.
#[derive(Debug)]
pub enum Completion {
    Chat(PromptOutcome),
    Health(urban_assistant::Result<HealthResponse>),
    HistoryDeleted(urban_assistant::Result<()>),
    Catalogue(AssetState<PromptCatalogue>),
    Datasets(OverlayDatasets),
}
