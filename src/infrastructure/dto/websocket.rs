//! WebSocket frame DTOs for the chat backend.

use serde::{Deserialize, Serialize};

use crate::domain::Message;

/// Inbound chat frame posted by a client: `{"message": "...", "user": "..."}`.
///
/// `user` is optional and defaults to `Anonymous` downstream. A frame whose
/// `message` field is absent or not a string fails deserialization, which the
/// connection handler treats as a malformed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundChatFrame {
    pub message: String,
    #[serde(default)]
    pub user: Option<String>,
}

/// Outbound chat frame broadcast to every member of the room group.
///
/// Serialized once by the sending connection's pipeline and forwarded
/// verbatim by each member's send task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundChatFrame {
    pub id: i64,
    pub user: String,
    pub content: String,
    /// ISO 8601 / RFC 3339, UTC
    pub timestamp: String,
    pub room: i64,
}

impl From<&Message> for OutboundChatFrame {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            user: message.user.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp.to_rfc3339(),
            room: message.room_id,
        }
    }
}

/// Error frame reported to the offending connection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorFrame {
    pub error: String,
}

impl ErrorFrame {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
