pub mod geo;
pub mod poi;
pub mod chat;
pub mod wire;
pub mod overlay;

pub use geo::{resolve_neighborhood, LatLon, NeighborhoodId, DEFAULT_NEIGHBORHOOD_CENTER, MAP_CENTER};
pub use poi::{PointOfInterest, ScreenPoint};
pub use chat::{ChatMessage, MessageId, MessageIdGenerator, MessageKind};
pub use wire::{ChatApiRequest, ChatApiResponse, HealthResponse, Recommendation};
pub use overlay::OverlayCategory;
