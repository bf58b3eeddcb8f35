//! Record store contract.
//!
//! The UseCase and UI layers depend on this trait; the concrete SQLite
//! implementation lives in the infrastructure layer (dependency inversion).

use async_trait::async_trait;

use super::entity::{Message, Room};
use super::error::RepositoryError;
use super::value_object::{MessageContent, RoomName, UserName};

/// Durable CRUD over `Room` and `Message`.
///
/// All calls are async so a blocking storage backend never stalls the
/// connection tasks delivering broadcasts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Create a room with the given unique name.
    ///
    /// # Errors
    ///
    /// `RepositoryError::DuplicateRoomName` if the name is already taken.
    async fn create_room(&self, name: &RoomName) -> Result<Room, RepositoryError>;

    /// Return the room with this id, creating it with default fields when it
    /// does not exist yet. Used on first chat activity in a room that may
    /// not be registered.
    async fn get_or_create_room(&self, room_id: i64) -> Result<Room, RepositoryError>;

    /// All rooms, in insertion (id) order.
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;

    /// Persist a message in an existing room. The creation timestamp is
    /// assigned by the store.
    ///
    /// # Errors
    ///
    /// `RepositoryError::RoomNotFound` if the room does not exist; nothing
    /// is written in that case.
    async fn create_message(
        &self,
        room_id: i64,
        user: &UserName,
        content: &MessageContent,
    ) -> Result<Message, RepositoryError>;

    /// Messages of a room ordered by creation timestamp ascending.
    ///
    /// # Errors
    ///
    /// `RepositoryError::RoomNotFound` if the room does not exist.
    async fn list_messages(&self, room_id: i64) -> Result<Vec<Message>, RepositoryError>;
}
