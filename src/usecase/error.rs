//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// メッセージ送信処理の失敗
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// 入力フィールドの検証エラー
    #[error("invalid message field: {0}")]
    Validation(#[from] ValueObjectError),

    /// 永続化の失敗（この場合ブロードキャストは行われない）
    #[error("store failure: {0}")]
    Store(#[from] RepositoryError),

    /// 送信フレームのシリアライズ失敗
    #[error("failed to encode outbound frame: {0}")]
    Encode(#[from] serde_json::Error),
}
