//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use urban_intellect::prelude::*;
//! ```

pub use crate::{
    AssistantClient, AssistantConfig, AssistantError, ChatMessage, CoordinatorHandle,
    DirAssetSource, EventLoop, HttpAssetSource, HttpAssistantClient, LatLon, MapCoordinator,
    MessageKind, NeighborhoodId, OverlayCategory, PointOfInterest, PromptPolicy, Recommendation,
    ScreenPoint, SessionConfig, Tab, UiEvent, ViewSnapshot,
};
