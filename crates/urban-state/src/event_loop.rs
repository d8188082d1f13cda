use crate::coordinator::MapCoordinator;
use crate::events::{Completion, UiEvent};
use crate::session::PromptTicket;
use crate::snapshot::ViewSnapshot;
use crate::tabs::AssistantPane;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use urban_assistant::AssistantClient;
use urban_overlays::{
    load_json, AssetSource, AssetState, OverlayDatasets, PromptCatalogue, PROMPT_CATALOGUE_PATH,
};

const EVENT_BUFFER: usize = 256;

/// Handle to a running event loop.
pub struct CoordinatorHandle {
    events: mpsc::Sender<UiEvent>,
    snapshots: watch::Receiver<ViewSnapshot>,
    task: JoinHandle<MapCoordinator>,
}

impl CoordinatorHandle {
    /// Forward a UI event. Fails only once the loop has stopped.
    pub async fn send(&self, event: UiEvent) -> Result<(), mpsc::error::SendError<UiEvent>> {
        self.events.send(event).await
    }

    pub fn sender(&self) -> mpsc::Sender<UiEvent> {
        self.events.clone()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the loop and take back the coordinator.
    pub async fn shutdown(self) -> Result<MapCoordinator, JoinError> {
        // the loop may already be gone; the join below reports that
        let _ = self.events.send(UiEvent::Shutdown).await;
        self.task.await
    }
}

/// Runs a [`MapCoordinator`] on its own task.
///
/// UI events arrive over an mpsc channel. Network and asset I/O is spawned and
/// reports back as [`Completion`]s, applied in the order they finish. A fresh
/// snapshot is published after every event.
pub struct EventLoop {
    coordinator: MapCoordinator,
    assets: Option<Arc<dyn AssetSource>>,
}

impl EventLoop {
    pub fn new(coordinator: MapCoordinator) -> Self {
        Self {
            coordinator,
            assets: None,
        }
    }

    /// Load the prompt catalogue and overlay datasets from `assets` on start.
    pub fn with_assets(mut self, assets: Arc<dyn AssetSource>) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Spawn the loop. A health check runs immediately.
    pub fn spawn(self) -> CoordinatorHandle {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(self.coordinator.snapshot());

        let task = tokio::spawn(self.run(events_rx, snapshot_tx));

        CoordinatorHandle {
            events: events_tx,
            snapshots: snapshot_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut events: mpsc::Receiver<UiEvent>,
        snapshots: watch::Sender<ViewSnapshot>,
    ) -> MapCoordinator {
        let (done_tx, mut done_rx) = mpsc::channel(EVENT_BUFFER);

        spawn_health_check(self.coordinator.client(), &done_tx);
        if let Some(assets) = self.assets.clone() {
            spawn_asset_loads(assets, &done_tx);
        }

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    None | Some(UiEvent::Shutdown) => break,
                    Some(event) => self.handle_event(event, &done_tx),
                },
                Some(done) = done_rx.recv() => self.handle_completion(done),
            }

            snapshots.send_replace(self.coordinator.snapshot());
        }

        self.coordinator.cancel_prompt();
        tracing::info!("Coordinator event loop stopped");
        self.coordinator
    }

    fn handle_event(&mut self, event: UiEvent, done: &mpsc::Sender<Completion>) {
        tracing::debug!("UI event: {:?}", event);
        let coordinator = &mut self.coordinator;
        let client = coordinator.client();

        // guarded no-ops are logged by the coordinator
        match event {
            UiEvent::PointClicked { id, click_x } => {
                let _ = coordinator.focus_point(&id, click_x);
            }
            UiEvent::PanelDismissed => coordinator.dismiss_panel(),
            UiEvent::FilterToggled { category, enabled } => {
                coordinator.set_filter(category, enabled)
            }
            UiEvent::TabSelected(tab) => {
                coordinator.select_tab(tab);
            }
            UiEvent::PointHovered { id, cursor } => {
                if let Err(e) = coordinator.hover_point(&id, cursor) {
                    tracing::debug!("Ignoring hover: {}", e);
                }
            }
            UiEvent::PointLeft => coordinator.leave_point(),
            UiEvent::InputChanged(text) => coordinator.set_input(text),
            UiEvent::PromptSubmitted => match coordinator.submit_input() {
                Ok(ticket) => spawn_prompt(client, ticket, done),
                Err(e) => tracing::debug!("Prompt not submitted: {}", e),
            },
            UiEvent::CancelPrompt => {
                coordinator.cancel_prompt();
            }
            UiEvent::ShowPromptSelector => coordinator.show_pane(AssistantPane::PromptSelector),
            UiEvent::ShowChat => coordinator.show_pane(AssistantPane::Chat),
            UiEvent::CategorySelected(index) => {
                if let Err(e) = coordinator.select_category(index) {
                    tracing::warn!("Ignoring category selection: {}", e);
                }
            }
            UiEvent::BackToCategories => coordinator.back_to_categories(),
            UiEvent::PromptPicked(index) => match coordinator.pick_prompt(index) {
                Ok(Some(ticket)) => spawn_prompt(client, ticket, done),
                Ok(None) => {}
                Err(e) => tracing::warn!("Ignoring prompt pick: {}", e),
            },
            UiEvent::RetryConnection => spawn_health_check(client, done),
            UiEvent::ClearHistory => spawn_clear_history(client, done),
            UiEvent::ResetAiRecommendations => coordinator.reset_ai_recommendations(),
            UiEvent::RecommendationActivated(id) => {
                let _ = coordinator.activate_recommendation(&id);
            }
            UiEvent::ViewportResized(width) => coordinator.set_viewport_width(width),
            UiEvent::Shutdown => {}
        }
    }

    fn handle_completion(&mut self, done: Completion) {
        match done {
            Completion::Chat(outcome) => {
                self.coordinator.apply_chat_outcome(outcome);
            }
            Completion::Health(result) => {
                let connected = self.coordinator.apply_health(result);
                tracing::info!("Assistant connected: {}", connected);
            }
            Completion::HistoryDeleted(result) => self.coordinator.apply_history_deleted(result),
            Completion::Catalogue(catalogue) => self.coordinator.set_catalogue(catalogue),
            Completion::Datasets(datasets) => self.coordinator.set_datasets(datasets),
        }
    }
}

fn spawn_prompt(
    client: Arc<dyn AssistantClient>,
    ticket: PromptTicket,
    done: &mpsc::Sender<Completion>,
) {
    let done = done.clone();
    tokio::spawn(async move {
        let outcome = ticket.dispatch(client).await;
        let _ = done.send(Completion::Chat(outcome)).await;
    });
}

fn spawn_health_check(client: Arc<dyn AssistantClient>, done: &mpsc::Sender<Completion>) {
    let done = done.clone();
    tokio::spawn(async move {
        let result = client.health().await;
        let _ = done.send(Completion::Health(result)).await;
    });
}

fn spawn_clear_history(client: Arc<dyn AssistantClient>, done: &mpsc::Sender<Completion>) {
    let done = done.clone();
    tokio::spawn(async move {
        let result = client.clear_history().await;
        let _ = done.send(Completion::HistoryDeleted(result)).await;
    });
}

fn spawn_asset_loads(assets: Arc<dyn AssetSource>, done: &mpsc::Sender<Completion>) {
    let catalogue_source = Arc::clone(&assets);
    let catalogue_done = done.clone();
    tokio::spawn(async move {
        let result =
            load_json::<PromptCatalogue>(catalogue_source.as_ref(), PROMPT_CATALOGUE_PATH).await;
        let catalogue = AssetState::from_result(PROMPT_CATALOGUE_PATH, result);
        let _ = catalogue_done.send(Completion::Catalogue(catalogue)).await;
    });

    let done = done.clone();
    tokio::spawn(async move {
        let datasets = OverlayDatasets::load(assets.as_ref()).await;
        let _ = done.send(Completion::Datasets(datasets)).await;
    });
}
