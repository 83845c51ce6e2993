//! Chat transcript for the assistant widget.
//!
//! The transcript is append-only: messages are never edited or removed, and
//! there is no way to clear it.

use serde::Serialize;

pub const WELCOME_MESSAGE: &str =
    "Welcome to Liwisi. I'm your design assistant. How can I help you elevate your space today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One visible line of the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into(), is_error: false }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into(), is_error: false }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into(), is_error: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A transcript seeded with the assistant's greeting.
    #[must_use]
    pub fn new() -> Self {
        Self { messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)] }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transcript_starts_with_welcome() {
        let t = Transcript::new();
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0], ChatMessage::assistant(WELCOME_MESSAGE));
    }

    #[test]
    fn push_appends_in_order() {
        let mut t = Transcript::new();
        t.push(ChatMessage::user("Which sofa for a small flat?"));
        t.push(ChatMessage::assistant("The Cloud Sofa is modular."));
        let roles: Vec<ChatRole> = t.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
    }

    #[test]
    fn error_flag_serializes_only_when_set() {
        let ok = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(ok, serde_json::json!({ "role": "user", "text": "hi" }));

        let err = serde_json::to_value(ChatMessage::error("oops")).unwrap();
        assert_eq!(err["is_error"], true);
        assert_eq!(err["role"], "assistant");
    }
}
