use crate::error::{Result, SessionError, StateError};
use crate::filters::FilterRegistry;
use crate::focus::{FocusController, DEFAULT_VIEWPORT_WIDTH};
use crate::hover::HoverController;
use crate::poi_store::PoiStore;
use crate::prompt_selector::PromptSelector;
use crate::session::{AssistantSession, PromptOutcome, PromptTicket, SessionConfig};
use crate::snapshot::{LayerView, LoadStatus, PopupView, ViewSnapshot};
use crate::tabs::{AssistantPane, Tab, TabController};
use std::sync::Arc;
use urban_assistant::AssistantClient;
use urban_overlays::{AssetState, OverlayDatasets, PromptCatalogue, PromptCategory};
use urban_types::{
    HealthResponse, OverlayCategory, PointOfInterest, Recommendation, ScreenPoint,
};

/// Owner of all page state.
///
/// Every mutation goes through `&mut self`, so a single task owns the
/// coordinator and views observe it through [`ViewSnapshot`]s. Network calls
/// are split into a synchronous start (returning a ticket) and an `apply_*`
/// step, which lets the event loop run them in the background. The `async`
/// methods chain both halves for callers that can simply await.
pub struct MapCoordinator {
    client: Arc<dyn AssistantClient>,
    store: PoiStore,
    focus: FocusController,
    filters: FilterRegistry,
    tabs: TabController,
    hover: HoverController,
    prompts: PromptSelector,
    session: AssistantSession,
    datasets: OverlayDatasets,
    viewport_width: f64,
}

impl MapCoordinator {
    pub fn new(client: Arc<dyn AssistantClient>, config: SessionConfig) -> Self {
        Self {
            client,
            store: PoiStore::new(),
            focus: FocusController::new(),
            filters: FilterRegistry::new(),
            tabs: TabController::new(),
            hover: HoverController::new(),
            prompts: PromptSelector::new(),
            session: AssistantSession::new(config),
            datasets: OverlayDatasets::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    /// Seed the store with manual points.
    pub fn with_points(mut self, points: Vec<PointOfInterest>) -> Self {
        self.store.replace_all(points);
        self
    }

    pub fn client(&self) -> Arc<dyn AssistantClient> {
        Arc::clone(&self.client)
    }

    // Focus

    /// Focus a point from a marker (`click_x` set) or list row (`None`).
    pub fn focus_point(&mut self, id: &str, click_x: Option<f64>) -> Result<()> {
        match self
            .focus
            .focus(&self.store, id, click_x, self.viewport_width)
        {
            Ok(focus) => {
                tracing::debug!("Focused {} at {:?}", focus.point.id, focus.center);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Ignoring focus request: {}", e);
                Err(e)
            }
        }
    }

    pub fn dismiss_panel(&mut self) {
        self.focus.dismiss();
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
        }
    }

    // Filters and tabs

    pub fn set_filter(&mut self, category: OverlayCategory, enabled: bool) {
        self.filters.set(category, enabled);
    }

    pub fn select_tab(&mut self, tab: Tab) -> Tab {
        self.tabs.select(tab)
    }

    pub fn show_pane(&mut self, pane: AssistantPane) {
        self.tabs.show_pane(pane);
    }

    // Hover

    pub fn hover_point(&mut self, id: &str, cursor: ScreenPoint) -> Result<bool> {
        let point = self
            .store
            .get(id)
            .ok_or_else(|| StateError::PointNotFound(id.to_string()))?;
        Ok(self.hover.on_hover(point, cursor))
    }

    pub fn leave_point(&mut self) {
        self.hover.on_leave();
    }

    // Assistant session

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.session.set_input(text);
    }

    pub fn submit_input(&mut self) -> std::result::Result<PromptTicket, SessionError> {
        self.session.submit_input()
    }

    pub fn begin_prompt(&mut self, text: &str) -> std::result::Result<PromptTicket, SessionError> {
        self.session.begin_prompt(text)
    }

    pub fn cancel_prompt(&mut self) -> bool {
        self.session.cancel()
    }

    /// Apply a chat completion. Returns how many AI points were installed.
    pub fn apply_chat_outcome(&mut self, outcome: PromptOutcome) -> usize {
        match self.session.complete(outcome) {
            Some(recommendations) => self.apply_recommendations(&recommendations),
            None => 0,
        }
    }

    /// Replace the store with points built from `recommendations`.
    ///
    /// An empty list leaves the store and the log untouched. The focused point
    /// is a snapshot and survives the replace.
    pub fn apply_recommendations(&mut self, recommendations: &[Recommendation]) -> usize {
        if recommendations.is_empty() {
            return 0;
        }

        let installed = self.store.replace_with_recommendations(recommendations);
        self.store.append_recommendations(recommendations);
        tracing::info!("Installed {} AI recommendations", installed);
        installed
    }

    pub fn apply_health(&mut self, result: urban_assistant::Result<HealthResponse>) -> bool {
        self.session.apply_health(result)
    }

    /// Local half of clearing the transcript; runs whatever the server says.
    pub fn apply_history_deleted(&mut self, result: urban_assistant::Result<()>) {
        if let Err(e) = result {
            tracing::error!("Failed to clear server chat history: {}", e);
        }
        self.session.clear_local();
    }

    /// Remove AI points, empty the recommendation log and unfocus an AI point.
    pub fn reset_ai_recommendations(&mut self) {
        self.store.clear_ai_recommendations();
        if self.focus.is_focused_on_ai() {
            self.focus.dismiss();
        }
        self.hover.on_leave();
        tracing::info!("AI recommendations reset");
    }

    /// Focus the map point of a transcript recommendation and reveal the map.
    pub fn activate_recommendation(&mut self, point_id: &str) -> Result<()> {
        self.focus_point(point_id, None)?;
        self.tabs.collapse();
        Ok(())
    }

    // Prompt selector

    pub fn set_catalogue(&mut self, catalogue: AssetState<PromptCatalogue>) {
        self.prompts.set_catalogue(catalogue);
    }

    pub fn select_category(&mut self, index: usize) -> Result<&PromptCategory> {
        self.prompts.select_category(index)
    }

    pub fn back_to_categories(&mut self) {
        self.prompts.back();
    }

    /// Choose a canned prompt: fill the input, switch to the chat pane and,
    /// when connected, submit it.
    pub fn pick_prompt(&mut self, index: usize) -> Result<Option<PromptTicket>> {
        let prompt = self.prompts.pick(index)?;
        self.session.set_input(prompt);
        self.tabs.show_pane(AssistantPane::Chat);

        if !self.session.is_connected() {
            return Ok(None);
        }

        match self.session.submit_input() {
            Ok(ticket) => Ok(Some(ticket)),
            Err(e) => {
                tracing::debug!("Picked prompt not submitted: {}", e);
                Ok(None)
            }
        }
    }

    pub fn set_datasets(&mut self, datasets: OverlayDatasets) {
        self.datasets = datasets;
    }

    // Awaiting conveniences

    /// Submit `text` and apply the reply. Returns installed AI point count.
    pub async fn send_prompt(&mut self, text: &str) -> std::result::Result<usize, SessionError> {
        let ticket = self.session.begin_prompt(text)?;
        let outcome = ticket.dispatch(self.client()).await;
        Ok(self.apply_chat_outcome(outcome))
    }

    pub async fn check_connection(&mut self) -> bool {
        let result = self.client.health().await;
        self.apply_health(result)
    }

    pub async fn clear_history(&mut self) {
        let result = self.client.clear_history().await;
        self.apply_history_deleted(result);
    }

    // Read access

    pub fn store(&self) -> &PoiStore {
        &self.store
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn tabs(&self) -> &TabController {
        &self.tabs
    }

    pub fn hover(&self) -> &HoverController {
        &self.hover
    }

    pub fn session(&self) -> &AssistantSession {
        &self.session
    }

    pub fn prompts(&self) -> &PromptSelector {
        &self.prompts
    }

    pub fn datasets(&self) -> &OverlayDatasets {
        &self.datasets
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let catalogue = self.prompts.catalogue();

        ViewSnapshot {
            active_tab: self.tabs.active(),
            assistant_pane: self.tabs.pane(),
            points: self.store.points().to_vec(),
            ai_points: self.store.ai_recommendations().cloned().collect(),
            focus: self.focus.focused().cloned(),
            panel_width: self.focus.panel_width(),
            filters: self.filters.entries(),
            layers: self
                .filters
                .visible_layers()
                .into_iter()
                .map(|category| LayerView::build(category, &self.datasets))
                .collect(),
            popup: self.hover.popup().map(PopupView::from),
            messages: self.session.history().to_vec(),
            input: self.session.input().to_string(),
            loading: self.session.is_loading(),
            connected: self.session.is_connected(),
            recent_prompt: self.session.recent_prompt().map(str::to_string),
            recommendation_log: self.store.recommendation_log().to_vec(),
            catalogue: LoadStatus::from(catalogue),
            categories: catalogue
                .ready()
                .map(|c| c.categories.clone())
                .unwrap_or_default(),
            selected_category: self.prompts.selected_category().cloned(),
            viewport_width: self.viewport_width,
        }
    }
}
