use crate::error::Result;
use async_trait::async_trait;
use urban_types::{ChatApiRequest, ChatApiResponse, HealthResponse};

/// Trait for the remote urban planning assistant
///
/// The HTTP implementation lives in [`crate::HttpAssistantClient`]; tests and
/// offline front ends can provide their own.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse>;

    /// `POST /chat`
    async fn chat(&self, request: ChatApiRequest) -> Result<ChatApiResponse>;

    /// `DELETE /chat/history`
    async fn clear_history(&self) -> Result<()>;
}
