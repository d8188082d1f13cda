#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use urban_assistant::{AssistantClient, AssistantError, Result};
use urban_types::{ChatApiRequest, ChatApiResponse, HealthResponse, Recommendation};

/// In-memory assistant.
///
/// Replies are taken from a queue; with an empty queue it echoes the prompt.
/// Prompts starting with `hang` never complete.
pub struct FakeAssistant {
    replies: Mutex<VecDeque<Result<ChatApiResponse>>>,
    prompts: Mutex<Vec<String>>,
    healthy: bool,
    clear_fails: bool,
}

impl FakeAssistant {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            healthy: true,
            clear_fails: false,
        }
    }

    pub fn offline() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    pub fn failing_clear(mut self) -> Self {
        self.clear_fails = true;
        self
    }

    pub fn reply(self, reply: Result<ChatApiResponse>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantClient for FakeAssistant {
    async fn health(&self) -> Result<HealthResponse> {
        if self.healthy {
            Ok(HealthResponse {
                status: "healthy".into(),
            })
        } else {
            Err(AssistantError::Unreachable("connection refused".into()))
        }
    }

    async fn chat(&self, request: ChatApiRequest) -> Result<ChatApiResponse> {
        self.prompts.lock().unwrap().push(request.message.clone());

        if request.message.starts_with("hang") {
            std::future::pending::<()>().await;
        }

        let queued = self.replies.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(response(&format!("echo: {}", request.message), vec![])))
    }

    async fn clear_history(&self) -> Result<()> {
        if self.clear_fails {
            Err(AssistantError::Server {
                status: 500,
                body: "boom".into(),
            })
        } else {
            Ok(())
        }
    }
}

pub fn response(text: &str, recommendations: Vec<Recommendation>) -> ChatApiResponse {
    ChatApiResponse {
        response: text.to_string(),
        intent: Some("development_recommendation".into()),
        confidence: Some(0.87),
        recommendations: Some(recommendations),
        timestamp: None,
    }
}
