use std::collections::VecDeque;
use urban_types::{ChatApiResponse, ChatMessage, MessageIdGenerator, MessageKind};

pub const DEFAULT_MAX_MESSAGES: usize = 50;

/// Append-only transcript capped at `max_messages`.
///
/// Oldest entries are dropped first, after each append.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: VecDeque<ChatMessage>,
    max_messages: usize,
    ids: MessageIdGenerator,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl ChatHistory {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            max_messages: max_messages.max(1),
            ids: MessageIdGenerator::new(),
        }
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push_back(message);
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
        // just pushed, so the deque is non-empty
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        let id = self.ids.next_id();
        self.push(ChatMessage::user(id, text))
    }

    pub fn push_assistant(&mut self, response: &ChatApiResponse) -> &ChatMessage {
        let id = self.ids.next_id();
        self.push(ChatMessage::assistant(id, response))
    }

    pub fn push_error(&mut self, text: impl Into<String>) -> &ChatMessage {
        let id = self.ids.next_id();
        self.push(ChatMessage::error(id, text))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.back()
    }

    pub fn count_of(&self, kind: MessageKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }
}
