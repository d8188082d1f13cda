pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod markup;
pub mod traits;

pub use client::HttpAssistantClient;
pub use config::{AssistantConfig, DEFAULT_BASE_URL};
pub use error::{AssistantError, Result};
pub use history::{ChatHistory, DEFAULT_MAX_MESSAGES};
pub use markup::{Block, Inline};
pub use traits::AssistantClient;
