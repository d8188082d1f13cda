use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use urban_assistant::{AssistantClient, AssistantError, ChatHistory, DEFAULT_MAX_MESSAGES};
use urban_types::{ChatApiRequest, ChatApiResponse, HealthResponse, Recommendation};

/// What happens when a prompt is submitted while another is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPolicy {
    /// Refuse the new prompt.
    #[default]
    Reject,
    /// Cancel the in-flight request and send the new prompt.
    Supersede,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_messages: usize,
    pub policy: PromptPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            policy: PromptPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_messages(mut self, max: usize) -> Self {
        self.max_messages = max;
        self
    }

    pub fn with_policy(mut self, policy: PromptPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// A submitted prompt, ready to be sent.
#[derive(Debug)]
pub struct PromptTicket {
    pub id: u64,
    pub message: String,
    cancel: CancellationToken,
}

impl PromptTicket {
    /// Send the prompt and wait for the reply or cancellation.
    pub async fn dispatch(self, client: Arc<dyn AssistantClient>) -> PromptOutcome {
        let PromptTicket { id, message, cancel } = self;

        let result = tokio::select! {
            _ = cancel.cancelled() => Err(AssistantError::Cancelled),
            result = client.chat(ChatApiRequest::new(message)) => result,
        };

        PromptOutcome { ticket: id, result }
    }
}

/// Completion of a dispatched prompt.
#[derive(Debug)]
pub struct PromptOutcome {
    pub ticket: u64,
    pub result: urban_assistant::Result<ChatApiResponse>,
}

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    cancel: CancellationToken,
}

/// Conversation state for the assistant tab.
///
/// The session never performs I/O itself: [`begin_prompt`](Self::begin_prompt)
/// hands out a [`PromptTicket`] for the caller to dispatch and
/// [`complete`](Self::complete) applies whatever came back.
#[derive(Debug)]
pub struct AssistantSession {
    config: SessionConfig,
    history: ChatHistory,
    input: String,
    connected: bool,
    in_flight: Option<InFlight>,
    last_ticket: u64,
    recent_prompt: Option<String>,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl AssistantSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            history: ChatHistory::new(config.max_messages),
            config,
            input: String::new(),
            connected: false,
            in_flight: None,
            last_ticket: 0,
            recent_prompt: None,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Submit the input buffer.
    pub fn submit_input(&mut self) -> Result<PromptTicket, SessionError> {
        let text = self.input.clone();
        self.begin_prompt(&text)
    }

    /// Record a user prompt and open a ticket for it.
    ///
    /// On success the user message is appended, the input buffer cleared and
    /// the session marked loading. Refusals change nothing.
    pub fn begin_prompt(&mut self, text: &str) -> Result<PromptTicket, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        if let Some(current) = self.in_flight.take() {
            match self.config.policy {
                PromptPolicy::Reject => {
                    self.in_flight = Some(current);
                    return Err(SessionError::Busy);
                }
                PromptPolicy::Supersede => {
                    tracing::debug!("Superseding in-flight prompt {}", current.ticket);
                    current.cancel.cancel();
                }
            }
        }

        self.history.push_user(text);
        self.input.clear();
        self.recent_prompt = Some(text.to_string());

        self.last_ticket += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            ticket: self.last_ticket,
            cancel: cancel.clone(),
        });

        Ok(PromptTicket {
            id: self.last_ticket,
            message: text.to_string(),
            cancel,
        })
    }

    /// Apply a prompt completion.
    ///
    /// Returns the recommendations of a successful reply. Completions for
    /// tickets other than the one in flight are stale and ignored.
    pub fn complete(&mut self, outcome: PromptOutcome) -> Option<Vec<Recommendation>> {
        match &self.in_flight {
            Some(current) if current.ticket == outcome.ticket => {}
            _ => {
                tracing::debug!("Discarding stale chat completion {}", outcome.ticket);
                return None;
            }
        }
        self.in_flight = None;

        match outcome.result {
            Ok(response) => {
                self.history.push_assistant(&response);
                Some(response.recommendations().to_vec())
            }
            Err(AssistantError::Cancelled) => None,
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                self.history.push_error(e.user_message());
                None
            }
        }
    }

    /// Cancel the in-flight prompt, if any. Its late completion is discarded.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(current) => {
                tracing::info!("Cancelled prompt {}", current.ticket);
                current.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Apply a health probe result. Failures are logged, never surfaced.
    pub fn apply_health(&mut self, result: urban_assistant::Result<HealthResponse>) -> bool {
        self.connected = match result {
            Ok(health) => {
                if !health.is_healthy() {
                    tracing::warn!("Assistant reported status {}", health.status);
                }
                health.is_healthy()
            }
            Err(e) => {
                tracing::warn!("Assistant health check failed: {}", e);
                false
            }
        };
        self.connected
    }

    pub fn clear_local(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn recent_prompt(&self) -> Option<&str> {
        self.recent_prompt.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urban_types::MessageKind;

    fn reply(text: &str, recommendations: Vec<Recommendation>) -> ChatApiResponse {
        serde_json::from_value(serde_json::json!({
            "response": text,
            "recommendations": recommendations,
        }))
        .unwrap()
    }

    #[test]
    fn test_begin_prompt_side_effects() {
        let mut session = AssistantSession::default();
        session.set_input("Where should I build?");

        let ticket = session.submit_input().unwrap();

        assert_eq!(ticket.message, "Where should I build?");
        assert_eq!(session.input(), "");
        assert!(session.is_loading());
        assert_eq!(session.recent_prompt(), Some("Where should I build?"));
        assert_eq!(session.history().count_of(MessageKind::User), 1);
    }

    #[test]
    fn test_blank_prompt_refused() {
        let mut session = AssistantSession::default();
        session.set_input("   \n");

        assert_eq!(session.submit_input().unwrap_err(), SessionError::EmptyPrompt);
        assert!(session.history().is_empty());
        assert_eq!(session.input(), "   \n");
        assert!(!session.is_loading());
    }

    #[test]
    fn test_reject_while_in_flight() {
        let mut session = AssistantSession::default();
        session.begin_prompt("first").unwrap();

        assert_eq!(session.begin_prompt("second").unwrap_err(), SessionError::Busy);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.recent_prompt(), Some("first"));
    }

    #[test]
    fn test_supersede_discards_stale_completion() {
        let mut session =
            AssistantSession::new(SessionConfig::new().with_policy(PromptPolicy::Supersede));
        let first = session.begin_prompt("first").unwrap();
        let second = session.begin_prompt("second").unwrap();
        assert!(first.cancel.is_cancelled());

        let stale = session.complete(PromptOutcome {
            ticket: first.id,
            result: Ok(reply("old", vec![Recommendation::new("1")])),
        });
        assert!(stale.is_none());
        assert!(session.is_loading());

        let fresh = session
            .complete(PromptOutcome {
                ticket: second.id,
                result: Ok(reply("new", vec![])),
            })
            .unwrap();
        assert!(fresh.is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.history().last().unwrap().text, "new");
    }

    #[test]
    fn test_failure_appends_error_message() {
        let mut session = AssistantSession::default();
        let ticket = session.begin_prompt("hello").unwrap();

        let recs = session.complete(PromptOutcome {
            ticket: ticket.id,
            result: Err(AssistantError::Server {
                status: 503,
                body: String::new(),
            }),
        });

        assert!(recs.is_none());
        assert!(!session.is_loading());
        let last = session.history().last().unwrap();
        assert_eq!(last.kind, MessageKind::Error);
        assert!(last.text.contains("temporarily unavailable"));
    }

    #[test]
    fn test_cancel_then_late_completion() {
        let mut session = AssistantSession::default();
        let ticket = session.begin_prompt("hello").unwrap();

        assert!(session.cancel());
        assert!(!session.is_loading());

        session.complete(PromptOutcome {
            ticket: ticket.id,
            result: Ok(reply("late", vec![])),
        });
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_apply_health() {
        let mut session = AssistantSession::default();
        assert!(session.apply_health(Ok(HealthResponse {
            status: "healthy".into()
        })));
        assert!(!session.apply_health(Ok(HealthResponse {
            status: "degraded".into()
        })));
        assert!(!session.apply_health(Err(AssistantError::Unreachable("refused".into()))));
        assert!(!session.is_connected());
    }
}
