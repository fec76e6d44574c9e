//! Chat-prompt serialisation with role-tagged delimiters.
//!
//! Each message becomes `<|role|>\n{content}</s>\n`; the block ends with an
//! open `<|assistant|>\n` tag marking where generation starts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Opening delimiter, e.g. `<|user|>\n`.
    pub fn open_tag(self) -> String {
        format!("<|{}|>\n", self.as_str())
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// End-of-turn marker closing every message.
pub const END_OF_TURN: &str = "</s>";

/// The two-message conversation sent for every drafting call.
pub fn build_conversation(system: &str, user: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Serialise `messages` in order and open the assistant turn.
pub fn format_chat_prompt(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(&message.role.open_tag());
        prompt.push_str(&message.content);
        prompt.push_str(END_OF_TURN);
        prompt.push('\n');
    }
    prompt.push_str(&ChatRole::Assistant.open_tag());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_and_user_format_exactly() {
        let prompt = format_chat_prompt(&build_conversation("S", "U"));
        assert_eq!(prompt, "<|system|>\nS</s>\n<|user|>\nU</s>\n<|assistant|>\n");
    }

    #[test]
    fn assistant_turns_are_tagged() {
        let messages = vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello"),
            ChatMessage::user("Draft it"),
        ];
        assert_eq!(
            format_chat_prompt(&messages),
            "<|user|>\nHi</s>\n<|assistant|>\nHello</s>\n<|user|>\nDraft it</s>\n<|assistant|>\n"
        );
    }

    #[test]
    fn empty_conversation_only_opens_assistant() {
        assert_eq!(format_chat_prompt(&[]), "<|assistant|>\n");
    }

    #[test]
    fn content_is_not_escaped() {
        let prompt = format_chat_prompt(&[ChatMessage::user("a </s> b\n<|system|>")]);
        assert!(prompt.contains("a </s> b\n<|system|></s>"));
    }
}
