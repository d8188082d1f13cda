use crate::wire::{ChatApiResponse, Recommendation};
use serde::{Deserialize, Serialize};

/// List key of a chat message. Derived from creation time in milliseconds.
pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    #[serde(alias = "ai")]
    Assistant,
    Error,
}

/// One entry of the assistant transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
    /// ISO-8601.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

impl ChatMessage {
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self::plain(id, MessageKind::User, text)
    }

    pub fn error(id: MessageId, text: impl Into<String>) -> Self {
        Self::plain(id, MessageKind::Error, text)
    }

    /// Assistant message built from a `/chat` response.
    ///
    /// The server timestamp is kept when present.
    pub fn assistant(id: MessageId, response: &ChatApiResponse) -> Self {
        Self {
            id,
            kind: MessageKind::Assistant,
            text: response.response.clone(),
            timestamp: response
                .timestamp
                .clone()
                .filter(|ts| !ts.is_empty())
                .unwrap_or_else(now_iso8601),
            intent: response.intent.clone(),
            confidence: response.confidence,
            recommendations: response.recommendations().to_vec(),
        }
    }

    fn plain(id: MessageId, kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            text: text.into(),
            timestamp: now_iso8601(),
            intent: None,
            confidence: None,
            recommendations: Vec::new(),
        }
    }

    /// Confidence as a whole percentage, e.g. `Some(87)` for `0.87`.
    pub fn confidence_percent(&self) -> Option<u32> {
        self.confidence
            .filter(|c| *c > 0.0)
            .map(|c| (c * 100.0).round() as u32)
    }
}

fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Issues time-based message ids that never repeat or go backwards.
#[derive(Debug, Default, Clone)]
pub struct MessageIdGenerator {
    last: MessageId,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MessageId {
        let now = chrono::Utc::now().timestamp_millis().max(0) as MessageId;
        self.last = now.max(self.last + 1);
        self.last
    }
}
