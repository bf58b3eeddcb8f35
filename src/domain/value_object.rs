//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::fmt;

use super::error::ValueObjectError;

/// Room name value object.
///
/// Represents the unique, human-readable name of a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    /// Maximum length of a room name in bytes
    pub const MAX_LEN: usize = 100;

    /// Create a new RoomName.
    ///
    /// # Arguments
    ///
    /// * `name` - The room name string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.len();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author name value object.
///
/// A free-form display name attached to a message; no identity behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Maximum length of a user name in bytes
    pub const MAX_LEN: usize = 100;

    /// Name used when the client does not supply one
    pub const ANONYMOUS: &str = "Anonymous";

    /// Create a new UserName.
    ///
    /// # Arguments
    ///
    /// * `name` - The user name string
    ///
    /// # Returns
    ///
    /// A Result containing the UserName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UserNameEmpty);
        }
        let len = name.len();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::UserNameTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// The default author for messages posted without a user field.
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ValueObjectError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Arbitrary-length text; only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Arguments
    ///
    /// * `content` - The message content string
    ///
    /// # Returns
    ///
    /// A Result containing the MessageContent or an error if validation fails
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(content: String) -> Result<Self, Self::Error> {
        Self::new(content)
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_new_success() {
        // テスト項目: 有効なルーム名を作成できる
        // given (前提条件):
        let name = "general".to_string();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "general");
    }

    #[test]
    fn test_room_name_new_empty_fails() {
        // テスト項目: 空のルーム名は作成できない
        // given (前提条件):
        let name = "".to_string();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_room_name_new_too_long_fails() {
        // テスト項目: 101 文字以上のルーム名は作成できない
        // given (前提条件):
        let name = "a".repeat(101);

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_user_name_anonymous() {
        // テスト項目: デフォルトの著者名は "Anonymous"
        // when (操作):
        let user = UserName::anonymous();

        // then (期待する結果):
        assert_eq!(user.as_str(), "Anonymous");
    }

    #[test]
    fn test_user_name_new_empty_fails() {
        // テスト項目: 空のユーザー名は作成できない
        // given (前提条件):
        let name = "".to_string();

        // when (操作):
        let result = UserName::new(name);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::UserNameEmpty);
    }

    #[test]
    fn test_message_content_new_success() {
        // テスト項目: 有効なメッセージ内容を作成できる
        // given (前提条件):
        let content = "Hello, world!".to_string();

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Hello, world!");
    }

    #[test]
    fn test_message_content_new_empty_fails() {
        // テスト項目: 空のメッセージ内容は作成できない
        // given (前提条件):
        let content = "".to_string();

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageContentEmpty);
    }

    #[test]
    fn test_message_content_accepts_long_text() {
        // テスト項目: メッセージ内容に長さの上限はない
        // given (前提条件):
        let content = "a".repeat(100_000);

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
