use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted transcript snapshot.
///
/// Every save produces a new `Chat`; earlier snapshots for the same student
/// are left in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: Uuid,
    pub student_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub created_at: jiff::Timestamp,
}

/// A single message in a persisted chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// An unsaved transcript entry, as held by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn stamped(self, timestamp: jiff::Timestamp) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content,
            timestamp,
        }
    }
}
