//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（永続化 → シリアライズ → ルームへのブロードキャスト）
//!
//! ### なぜこのテストが必要か
//! - 「永続化成功後にのみブロードキャストする」という不変条件を保証
//! - 送信元を含むルーム全員に同一ペイロードが届くことを確認
//! - 入力検証エラー時に Repository が呼ばれないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 永続化とブロードキャスト
//! - 異常系: 永続化失敗（ブロードキャストなし）
//! - 異常系: 空メッセージなどの検証エラー

use std::sync::Arc;

use crate::domain::{ChatRepository, Message, MessageContent, UserName};
use crate::hub::{RoomHub, room_group};
use crate::infrastructure::dto::websocket::OutboundChatFrame;

use super::error::SendMessageError;

/// メッセージ送信のユースケース
///
/// 接続ハンドラから呼ばれ、受信フレームを 1 件のメッセージとして
/// 永続化した後、そのルームのグループへブロードキャストします。
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// ルーム別ブロードキャストハブ
    hub: Arc<RoomHub>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>, hub: Arc<RoomHub>) -> Self {
        Self { repository, hub }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続パスで指定されたルーム ID
    /// * `user` - 受信フレームの user フィールド（省略時は Anonymous）
    /// * `message` - 受信フレームの message フィールド
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 永続化されたメッセージ
    /// * `Err(SendMessageError)` - 検証・永続化・エンコードの失敗。
    ///   永続化に失敗した場合、ブロードキャストは一切行われない。
    pub async fn execute(
        &self,
        room_id: i64,
        user: Option<String>,
        message: String,
    ) -> Result<Message, SendMessageError> {
        let user = match user {
            Some(name) => UserName::try_from(name)?,
            None => UserName::anonymous(),
        };
        let content = MessageContent::try_from(message)?;

        // 1. ルームを必要なら暗黙的に作成し、メッセージを永続化
        self.repository.get_or_create_room(room_id).await?;
        let persisted = self
            .repository
            .create_message(room_id, &user, &content)
            .await?;

        // 2. 永続化に成功した場合のみ、ルーム全員（送信元含む）へ配送
        let payload = serde_json::to_string(&OutboundChatFrame::from(&persisted))?;
        let delivered = self.hub.broadcast(&room_group(room_id), &payload).await;
        tracing::debug!(
            "message {} broadcast to {} connection(s) in room {}",
            persisted.id,
            delivered,
            room_id
        );

        Ok(persisted)
    }
}
