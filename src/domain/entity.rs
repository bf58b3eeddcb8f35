//! Core domain records for the chat backend.
//!
//! `Room` and `Message` mirror the rows the record store persists. Field
//! validation happens at the edges through the value objects; entities carry
//! the stored representation.

use chrono::{DateTime, Utc};

/// A named channel grouping messages and live connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Room identifier (primary key)
    pub id: i64,
    /// Unique room name
    pub name: String,
    /// Timestamp when the room was created
    pub created_at: DateTime<Utc>,
}

/// A single chat message, immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message identifier (primary key)
    pub id: i64,
    /// Owning room; the message is deleted with it
    pub room_id: i64,
    /// Free-form author name, no identity verification
    pub user: String,
    /// Message body
    pub content: String,
    /// Server-assigned creation timestamp
    pub timestamp: DateTime<Utc>,
}
