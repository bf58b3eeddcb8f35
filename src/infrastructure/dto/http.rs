//! REST API DTOs for the chat backend.

use serde::{Deserialize, Serialize};

use crate::domain::{Message, Room};

/// Room representation returned by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: i64,
    pub name: String,
    pub created_at: String, // ISO 8601
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            created_at: room.created_at.to_rfc3339(),
        }
    }
}

/// Message representation returned by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: i64,
    pub room: i64,
    pub user: String,
    pub content: String,
    pub timestamp: String, // ISO 8601
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            room: message.room_id,
            user: message.user.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}

/// Body of `POST /api/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
}

/// Body of `POST /api/rooms/{room_id}/messages`. The room id comes from the
/// route, not the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub content: String,
    #[serde(default)]
    pub user: Option<String>,
}
