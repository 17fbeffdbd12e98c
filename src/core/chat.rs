//! # Chat Log
//!
//! Append-ordered log of conversation turns. Owns every [`Message`]; the
//! TUI only ever sees `&[Message]`.
//!
//! The in-flight generation is represented by a single *loading placeholder*
//!; a bot message with the reserved [`MessageId::PLACEHOLDER`] id and
//! `is_loading: true`. At most one exists at a time; it is either resolved
//! into the final response or discarded when generation fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque message identifier. Real ids are handed out by [`ChatLog`] from a
/// monotonically increasing counter, so id order matches append order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    /// Reserved sentinel carried by the loading placeholder. Never handed
    /// out by the counter.
    pub const PLACEHOLDER: MessageId = MessageId(0);
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub is_loading: bool,
}

#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    fn fresh_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, content: String, sender: Sender) -> MessageId {
        let id = self.fresh_id();
        self.messages.push(Message {
            id,
            content,
            sender,
            timestamp: Utc::now(),
            is_loading: false,
        });
        id
    }

    /// Append a user message. Emptiness is the controller's concern; the log
    /// appends whatever it is given.
    pub fn push_user(&mut self, content: impl Into<String>) -> MessageId {
        self.push(content.into(), Sender::User)
    }

    /// Append a completed bot message (used for the synthesized error reply).
    pub fn push_bot(&mut self, content: impl Into<String>) -> MessageId {
        self.push(content.into(), Sender::Bot)
    }

    /// Append the loading placeholder for an in-flight generation.
    ///
    /// If a placeholder is already present its id is returned without
    /// appending another; the single-placeholder invariant holds no matter
    /// what the caller does.
    pub fn push_placeholder(&mut self) -> MessageId {
        if let Some(id) = self.placeholder_id() {
            log::warn!("placeholder requested while one is already in flight");
            return id;
        }
        self.messages.push(Message {
            id: MessageId::PLACEHOLDER,
            content: String::new(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            is_loading: true,
        });
        MessageId::PLACEHOLDER
    }

    /// Turn the loading message with `id` into a completed bot message with
    /// the final content. Silent no-op if no such loading message exists
    /// (e.g. the chat was cleared while the request was outstanding).
    pub fn resolve(&mut self, id: MessageId, content: impl Into<String>) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id && m.is_loading) {
            msg.content = content.into();
            msg.is_loading = false;
        }
    }

    /// Remove the message with `id` entirely, leaving no trace.
    pub fn discard(&mut self, id: MessageId) {
        self.messages.retain(|m| m.id != id);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The bot message with the greatest index; the typing renderer's one
    /// and only animation target.
    pub fn latest_bot(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.sender == Sender::Bot)
    }

    /// Id of the in-flight placeholder, if any.
    pub fn placeholder_id(&self) -> Option<MessageId> {
        self.messages.iter().find(|m| m.is_loading).map(|m| m.id)
    }
}
