//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとの `UnboundedSender` を管理
//! - 通知を JSON にエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受け付けは UI 層（`ui/handler/websocket.rs`）で行われます。
//! UI 層は sender を生成してここに登録し、受信側を自身の書き込みタスクで読み出します。
//! ブロードキャストでは通知を 1 回だけエンコードし、同じフレームを各チャンネルに送ります。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のコネクションの送信チャンネル
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(notification))
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn connected_clients(&self) -> Vec<ConnectionId> {
        let clients = self.clients.lock().await;
        clients.keys().copied().collect()
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(frame)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!(
                "Pushed '{}' to connection '{}'",
                notification.event_name(),
                connection_id
            );
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(connection_id.to_string()))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(frame.clone()) {
                    tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                } else {
                    tracing::debug!(
                        "Broadcasted '{}' to connection '{}'",
                        notification.event_name(),
                        target
                    );
                }
            } else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageId, Username};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の基本的な送信機能
    // - push_to: 特定のコネクションへの送信（JSON エンコードを含む）
    // - broadcast: 複数コネクションへの送信
    // - エラーハンドリング（存在しないコネクション）
    // ========================================

    fn create_test_pusher() -> WebSocketMessagePusher {
        WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())))
    }

    fn decode(frame: Option<String>) -> ServerEvent {
        serde_json::from_str(&frame.expect("frame should be delivered")).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のコネクションに JSON エンコードされた通知を送信できる
        // given (前提条件):
        let pusher = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register_client(conn, tx).await;

        // when (操作):
        let result = pusher
            .push_to(
                &conn,
                &Notification::AuthError {
                    message: "Invalid access code".to_string(),
                },
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            decode(rx.recv().await),
            ServerEvent::AuthError {
                message: "Invalid access code".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないコネクションへの送信はエラーを返す
        // given (前提条件):
        let pusher = create_test_pusher();

        // when (操作):
        let result = pusher
            .push_to(&ConnectionId::generate(), &Notification::UserStopTyping)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のコネクションに同じ通知をブロードキャストできる
        // given (前提条件):
        let pusher = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let conn1 = ConnectionId::generate();
        let conn2 = ConnectionId::generate();
        pusher.register_client(conn1, tx1).await;
        pusher.register_client(conn2, tx2).await;

        // when (操作):
        let notification = Notification::DeleteMessage {
            id: MessageId::new(7),
        };
        let result = pusher.broadcast(vec![conn1, conn2], &notification).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(decode(rx1.recv().await), ServerEvent::DeleteMessage { id: 7 });
        assert_eq!(decode(rx2.recv().await), ServerEvent::DeleteMessage { id: 7 });
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部のコネクションが存在しない・切断済みでもブロードキャストは成功する
        // given (前提条件):
        let pusher = create_test_pusher();
        let (tx_alive, mut rx_alive) = mpsc::unbounded_channel();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        drop(rx_dead);
        let alive = ConnectionId::generate();
        let dead = ConnectionId::generate();
        pusher.register_client(alive, tx_alive).await;
        pusher.register_client(dead, tx_dead).await;

        // when (操作):
        let notification = Notification::UserTyping {
            username: Username::new("alice".to_string()),
        };
        let result = pusher
            .broadcast(vec![alive, dead, ConnectionId::generate()], &notification)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            decode(rx_alive.recv().await),
            ServerEvent::UserTyping {
                username: "alice".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // テスト項目: 登録解除したコネクションは一覧から消える
        // given (前提条件):
        let pusher = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register_client(conn, tx).await;

        // when (操作):
        pusher.unregister_client(&conn).await;

        // then (期待する結果):
        assert!(pusher.connected_clients().await.is_empty());
    }
}
