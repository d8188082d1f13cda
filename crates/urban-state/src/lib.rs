pub mod coordinator;
pub mod error;
pub mod event_loop;
pub mod events;
pub mod filters;
pub mod focus;
pub mod hover;
pub mod poi_store;
pub mod prompt_selector;
pub mod session;
pub mod snapshot;
pub mod tabs;

pub use coordinator::MapCoordinator;
pub use error::{Result, SessionError, StateError};
pub use event_loop::{CoordinatorHandle, EventLoop};
pub use events::{Completion, UiEvent};
pub use filters::{FilterEntry, FilterRegistry};
pub use focus::{panel_width, Focus, FocusController, DEFAULT_PANEL_WIDTH, DEFAULT_VIEWPORT_WIDTH};
pub use hover::{HoverController, HoverPopup};
pub use poi_store::PoiStore;
pub use prompt_selector::PromptSelector;
pub use session::{AssistantSession, PromptOutcome, PromptPolicy, PromptTicket, SessionConfig};
pub use snapshot::{LayerView, LoadStatus, PopupView, ViewSnapshot};
pub use tabs::{AssistantPane, Tab, TabController};
