//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// UserName validation error
    #[error("UserName cannot be empty")]
    UserNameEmpty,

    /// UserName too long error
    #[error("UserName cannot exceed {max} characters (got {actual})")]
    UserNameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,
}

/// Errors surfaced by the record store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Room creation conflict on the unique name
    #[error("room name '{0}' is already taken")]
    DuplicateRoomName(String),

    /// Message operation against a room that does not exist
    #[error("room {0} does not exist")]
    RoomNotFound(i64),

    /// Persistence backend failure
    #[error("storage backend unavailable: {0}")]
    Backend(#[from] sqlx::Error),
}
