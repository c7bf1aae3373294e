//! UseCase: 画像メッセージ送信処理
//!
//! 画像は送信から一定時間（既定 1 分）で消える。
//! 送信時に遅延削除のタスクを起動し、時間が来たら ExpireMessagesUseCase で取り除く。

use std::{sync::Arc, time::Duration};

use hanare_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, ImageData, MessageBody, MessagePusher, Notification,
    RoomRepository, Timestamp,
};

use super::{ExpireMessagesUseCase, error::SendImageError};

/// 画像メッセージ送信のユースケース
pub struct SendImageUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    expire_messages: Arc<ExpireMessagesUseCase>,
    /// 受け付ける base64 文字列の最大長
    max_image_chars: usize,
    image_ttl: Duration,
}

impl SendImageUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        expire_messages: Arc<ExpireMessagesUseCase>,
        max_image_chars: usize,
        image_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            expire_messages,
            max_image_chars,
            image_ttl,
        }
    }

    /// 画像送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ChatMessage))` - 作成されたメッセージ
    /// * `Ok(None)` - 未認証のため無視した
    /// * `Err(SendImageError)` - 拒否。本人には `error` が送信済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        image_data: String,
    ) -> Result<Option<ChatMessage>, SendImageError> {
        let Some(username) = self.repository.find_username(&connection_id).await else {
            tracing::debug!(
                "Ignored send_image from unauthenticated connection '{}'",
                connection_id
            );
            return Ok(None);
        };

        let image = match ImageData::new(image_data, self.max_image_chars) {
            Ok(image) => image,
            Err(e) => {
                let error = SendImageError::from(e);
                self.reject(&connection_id, &error).await;
                return Err(error);
            }
        };

        // 1. 履歴に追加（直後に掃除される）
        let now = Timestamp::new(self.clock.now_millis());
        let outcome = self
            .repository
            .append_message(username, MessageBody::Image(image), now)
            .await;

        // 2. 押し出された画像を通知
        self.expire_messages
            .announce_evictions(&outcome.evicted)
            .await;

        // 3. 送信者を含む全コネクションにブロードキャスト
        let targets = self.message_pusher.connected_clients().await;
        let notification = Notification::NewMessage(outcome.message.clone());
        if let Err(e) = self.message_pusher.broadcast(targets, &notification).await {
            tracing::warn!("Failed to broadcast new_message: {}", e);
        }

        // 4. 遅延削除を予約
        self.expire_messages
            .schedule_expiry(outcome.message.id, self.image_ttl);

        tracing::info!(
            "'{}' sent image {} (expires in {}s)",
            outcome.message.username,
            outcome.message.id,
            self.image_ttl.as_secs()
        );
        Ok(Some(outcome.message))
    }

    async fn reject(&self, connection_id: &ConnectionId, error: &SendImageError) {
        tracing::warn!("Rejected image from '{}': {}", connection_id, error);
        let notification = Notification::Error {
            message: error.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &notification).await {
            tracing::warn!("Failed to push error to '{}': {}", connection_id, e);
        }
    }
}
