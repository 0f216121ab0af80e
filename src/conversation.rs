//! Conversation log and simulated streaming.
//!
//! The log is append-only from the caller's point of view: messages are
//! immutable once added. [`StreamChunks`] reproduces the chat view's fake
//! streaming, revealing an already-complete response a few characters at a
//! time.

use serde::{Deserialize, Serialize};

use crate::render::{ContentBlock, MarkdownRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Seconds the model took to answer, assistant messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_seconds: Option<f64>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            response_time_seconds: None,
        }
    }

    pub fn assistant(content: impl Into<String>, response_time_seconds: Option<f64>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            response_time_seconds,
        }
    }
}

/// Ordered, append-only message log for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        crate::debug_info!(
            "CONVERSATION",
            "append {:?} message ({} bytes), log length {}",
            message.role,
            message.content.len(),
            self.messages.len() + 1
        );
        self.messages.push(message);
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

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Start a new conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Render every message in order, one block list per message.
    pub fn render_all(&self, renderer: &MarkdownRenderer) -> Vec<Vec<ContentBlock>> {
        self.messages
            .iter()
            .map(|m| renderer.render_message(m))
            .collect()
    }
}

/// Growing prefixes of a complete response, `chunk_size` characters apart.
///
/// The last item is always the full text. Cuts land on char boundaries.
#[derive(Debug, Clone)]
pub struct StreamChunks<'a> {
    text: &'a str,
    chunk_size: usize,
    shown: usize,
    done: bool,
}

impl<'a> StreamChunks<'a> {
    /// A `chunk_size` of zero is treated as one.
    pub fn new(text: &'a str, chunk_size: usize) -> Self {
        Self {
            text,
            chunk_size: chunk_size.max(1),
            shown: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for StreamChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let end = self.text[self.shown..]
            .char_indices()
            .nth(self.chunk_size)
            .map_or(self.text.len(), |(i, _)| self.shown + i);
        self.shown = end;
        if end == self.text.len() {
            self.done = true;
        }
        Some(&self.text[..end])
    }
}
