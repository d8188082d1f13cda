//! # Urban Intellect
//!
//! State coordinator for an AI-assisted urban planning map.
//!
//! ## Overview
//!
//! Urban Intellect keeps everything a map front end needs to know between
//! renders:
//!
//! - **Points of interest**, seeded manually or produced by the assistant
//! - **Focus** on one point, with a detail panel sized from the click position
//! - **Overlay filters** for population density, air quality and more
//! - **An assistant session** that sends prompts to a remote planning service
//!   and turns its recommendations into map points
//! - **Hover popups** for AI-recommended points
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use urban_intellect::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(HttpAssistantClient::new(
//!         AssistantConfig::new("http://localhost:8000"),
//!     )?);
//!
//!     let handle = EventLoop::new(MapCoordinator::new(client, SessionConfig::default()))
//!         .with_assets(Arc::new(DirAssetSource::new("public")))
//!         .spawn();
//!
//!     handle.send(UiEvent::InputChanged("Where should I develop 200 houses?".into())).await?;
//!     handle.send(UiEvent::PromptSubmitted).await?;
//!
//!     let mut snapshots = handle.subscribe();
//!     while snapshots.changed().await.is_ok() {
//!         let view = snapshots.borrow().clone();
//!         if !view.loading && view.messages.len() >= 2 {
//!             for point in &view.points {
//!                 println!("{} at {:?}", point.title, point.center);
//!             }
//!             break;
//!         }
//!     }
//!
//!     handle.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`urban-types`**: data model, wire types and the neighborhood resolver
//! - **`urban-assistant`**: assistant HTTP client, chat history, reply markup
//! - **`urban-overlays`**: static assets, overlay datasets, prompt catalogue
//! - **`urban-state`**: the coordinator, its components and the event loop
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use urban_types::{
    resolve_neighborhood, ChatApiRequest, ChatApiResponse, ChatMessage, HealthResponse, LatLon,
    MessageKind, NeighborhoodId, OverlayCategory, PointOfInterest, Recommendation, ScreenPoint,
    DEFAULT_NEIGHBORHOOD_CENTER, MAP_CENTER,
};

pub use urban_assistant::{
    markup, AssistantClient, AssistantConfig, AssistantError, ChatHistory, HttpAssistantClient,
};

pub use urban_overlays::{
    AssetError, AssetSource, AssetState, DirAssetSource, HttpAssetSource, OverlayDatasets,
    PromptCatalogue,
};

pub use urban_state::{
    AssistantPane, AssistantSession, CoordinatorHandle, EventLoop, MapCoordinator, PromptPolicy,
    SessionConfig, SessionError, StateError, Tab, UiEvent, ViewSnapshot,
};
