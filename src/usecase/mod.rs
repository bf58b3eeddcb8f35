//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層とハブを操作します。

pub mod error;
pub mod send_message;

pub use error::SendMessageError;
pub use send_message::SendMessageUseCase;
