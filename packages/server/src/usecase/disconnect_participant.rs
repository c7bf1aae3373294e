//! UseCase: 切断処理
//!
//! コネクションの送信チャンネルは必ず登録解除する。
//! 認証済みだった場合はセッションを取り除き、残りの全コネクションに `user_left` を送る。

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, Notification, RoomRepository};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - 退室したセッション
    /// * `None` - 未認証のコネクションだった
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<Departure> {
        // 1. 送信チャンネルを登録解除
        self.message_pusher.unregister_client(&connection_id).await;

        // 2. セッションを取り除く
        let Some(departure) = self.repository.remove_session(&connection_id).await else {
            tracing::debug!("Unauthenticated connection '{}' closed", connection_id);
            return None;
        };

        // 3. 残りの全コネクションに退室を知らせる
        let targets = self.message_pusher.connected_clients().await;
        let notification = Notification::UserLeft {
            username: departure.username.clone(),
            users_online: departure.roster.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &notification).await {
            tracing::warn!("Failed to broadcast user_left: {}", e);
        }

        tracing::info!(
            "'{}' left the chat ({} online)",
            departure.username,
            departure.roster.len()
        );
        Some(departure)
    }
}
