//! Domain layer for the chat backend.
//!
//! This module contains the record types, validation rules and the storage
//! contract, independent of data transfer objects and infrastructure
//! concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{Message, Room};
pub use error::{RepositoryError, ValueObjectError};
pub use repository::ChatRepository;
pub use value_object::{MessageContent, RoomName, UserName};
