//! UseCase: コネクション確立処理
//!
//! 認証前のコネクションも通知の配信対象になるため、接続直後に送信チャンネルを登録する。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// コネクション確立のユースケース
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 新しいコネクションの送信チャンネルを登録する
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        tracing::debug!("Connection '{}' opened", connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Notification,
        infrastructure::dto::websocket::ServerEvent,
        usecase::test_support::{TestRoom, drain},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connected_client_receives_pushes() {
        // テスト項目: 登録したコネクションは認証前でも通知を受け取れる
        // given (前提条件):
        let room = TestRoom::new(2);
        let usecase = ConnectClientUseCase::new(room.pusher());
        let connection_id = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(connection_id, tx).await;

        // then (期待する結果):
        room.pusher
            .push_to(&connection_id, &Notification::UserStopTyping)
            .await
            .unwrap();
        assert_eq!(drain(&mut rx), vec![ServerEvent::UserStopTyping]);
    }
}
