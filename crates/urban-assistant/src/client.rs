// HTTP implementation of the assistant client

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::traits::AssistantClient;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use urban_types::{ChatApiRequest, ChatApiResponse, HealthResponse};

/// Assistant client talking JSON over HTTP (reqwest, no SDK)
#[derive(Debug, Clone)]
pub struct HttpAssistantClient {
    http_client: reqwest::Client,
    config: AssistantConfig,
}

impl HttpAssistantClient {
    pub fn new(config: AssistantConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Map non-success statuses to [`AssistantError::Server`]
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response body".to_string());

        tracing::warn!("Assistant API request failed: status={}, body={}", status, body);

        Err(AssistantError::Server {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(AssistantError::from_transport)?;

        serde_json::from_slice(&bytes).map_err(|e| AssistantError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http_client
            .get(self.config.endpoint("/health"))
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(AssistantError::from_transport)?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn chat(&self, request: ChatApiRequest) -> Result<ChatApiResponse> {
        tracing::debug!("Sending prompt to assistant ({} chars)", request.message.len());

        let response = self
            .http_client
            .post(self.config.endpoint("/chat"))
            .timeout(self.config.chat_timeout)
            .json(&request)
            .send()
            .await
            .map_err(AssistantError::from_transport)?;

        let response = Self::check_status(response).await?;
        let parsed: ChatApiResponse = Self::decode(response).await?;

        tracing::debug!(
            "Assistant replied: intent={:?}, recommendations={}",
            parsed.intent,
            parsed.recommendations().len()
        );

        Ok(parsed)
    }

    async fn clear_history(&self) -> Result<()> {
        let response = self
            .http_client
            .delete(self.config.endpoint("/chat/history"))
            .timeout(self.config.chat_timeout)
            .send()
            .await
            .map_err(AssistantError::from_transport)?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpAssistantClient::new(AssistantConfig::new("http://localhost:9000/"));

        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://localhost:9000");
    }
}
