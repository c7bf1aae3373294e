//! UseCase: 入力中表示の中継
//!
//! `typing` は認証済みのコネクションからのみ中継する。
//! `stop_typing` は認証を確認せず、ユーザー名も付けずに中継する。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, RoomRepository};

use super::all_except;

/// 入力中表示のユースケース
pub struct TypingUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl TypingUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 入力開始を本人以外に中継する。未認証なら `false`
    pub async fn start(&self, connection_id: ConnectionId) -> bool {
        let Some(username) = self.repository.find_username(&connection_id).await else {
            return false;
        };

        let notification = Notification::UserTyping { username };
        self.relay(connection_id, &notification).await;
        true
    }

    /// 入力終了を本人以外に中継する
    pub async fn stop(&self, connection_id: ConnectionId) {
        self.relay(connection_id, &Notification::UserStopTyping)
            .await;
    }

    async fn relay(&self, connection_id: ConnectionId, notification: &Notification) {
        let targets = all_except(
            self.message_pusher.connected_clients().await,
            &connection_id,
        );
        if let Err(e) = self.message_pusher.broadcast(targets, notification).await {
            tracing::warn!("Failed to relay {}: {}", notification.event_name(), e);
        }
    }
}
