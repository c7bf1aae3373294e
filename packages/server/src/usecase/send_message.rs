//! UseCase: テキストメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全コネクションに new_message が届くこと
//! - 未認証のコネクションからの送信が黙って無視されること
//! - 送信直後の掃除・件数上限で消えた画像が通知されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：認証済みユーザーの送信
//! - 異常系：未認証のコネクションからの送信
//! - エッジケース：件数上限を超えて古い画像が押し出される場合

use std::sync::Arc;

use hanare_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageBody, MessagePusher, Notification, RoomRepository,
    Timestamp,
};

use super::ExpireMessagesUseCase;

/// テキストメッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    expire_messages: Arc<ExpireMessagesUseCase>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        expire_messages: Arc<ExpireMessagesUseCase>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            expire_messages,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Some(ChatMessage)` - 作成されたメッセージ
    /// * `None` - 未認証のため無視した
    pub async fn execute(&self, connection_id: ConnectionId, text: String) -> Option<ChatMessage> {
        let Some(username) = self.repository.find_username(&connection_id).await else {
            tracing::debug!(
                "Ignored send_message from unauthenticated connection '{}'",
                connection_id
            );
            return None;
        };

        // 1. 履歴に追加（直後に掃除される）
        let now = Timestamp::new(self.clock.now_millis());
        let outcome = self
            .repository
            .append_message(username, MessageBody::Text(text), now)
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

        tracing::debug!(
            "'{}' sent message {}",
            outcome.message.username,
            outcome.message.id
        );
        Some(outcome.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ImageData, MockMessagePusher, RetentionPolicy},
        infrastructure::dto::websocket::{MessageKindDto, ServerEvent},
        usecase::test_support::{T0, TestRoom, drain, username},
    };

    fn create_usecase(room: &TestRoom) -> SendMessageUseCase {
        SendMessageUseCase::new(
            room.repository(),
            room.pusher(),
            room.clock(),
            room.expire_messages(),
        )
    }

    #[tokio::test]
    async fn test_send_message_broadcasts_to_everyone() {
        // テスト項目: 送信者を含む全コネクションに new_message が届く
        // given (前提条件):
        let room = TestRoom::new(2);
        let usecase = create_usecase(&room);
        let (alice, mut alice_rx) = room.join("alice").await;
        let (_bob, mut bob_rx) = room.join("bob").await;

        // when (操作):
        let message = usecase.execute(alice, "hi".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(message.id.value(), T0);
        for rx in [&mut alice_rx, &mut bob_rx] {
            match drain(rx).as_slice() {
                [ServerEvent::NewMessage(dto)] => {
                    assert_eq!(dto.id, T0);
                    assert_eq!(dto.kind, MessageKindDto::Text);
                    assert_eq!(dto.username, "alice");
                    assert_eq!(dto.text.as_deref(), Some("hi"));
                    assert_eq!(dto.created_at, T0);
                    assert_eq!(dto.expires_at, None);
                }
                other => panic!("unexpected events: {:?}", other),
            }
        }
        assert_eq!(room.repository.history(room.now()).await, vec![message]);
    }

    #[tokio::test]
    async fn test_send_message_ids_are_strictly_increasing() {
        // テスト項目: 同一ミリ秒内の連続送信でも ID が重複しない
        // given (前提条件):
        let room = TestRoom::new(2);
        let usecase = create_usecase(&room);
        let (alice, _alice_rx) = room.join("alice").await;

        // when (操作):
        let first = usecase.execute(alice, "a".to_string()).await.unwrap();
        let second = usecase.execute(alice, "b".to_string()).await.unwrap();

        // then (期待する結果):
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_send_message_unauthenticated_is_ignored() {
        // テスト項目: 未認証のコネクションからの送信は黙って無視される
        // given (前提条件):
        let room = TestRoom::new(2);
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        pusher.expect_push_to().never();
        let usecase = SendMessageUseCase::new(
            room.repository(),
            Arc::new(pusher),
            room.clock(),
            room.expire_messages(),
        );
        let stranger = ConnectionId::generate();

        // when (操作):
        let result = usecase.execute(stranger, "hi".to_string()).await;

        // then (期待する結果):
        assert!(result.is_none());
        assert!(room.repository.history(room.now()).await.is_empty());
    }

    #[tokio::test]
    async fn test_send_message_announces_trimmed_image() {
        // テスト項目: 件数上限で押し出された画像に delete_message が送られる
        // given (前提条件):
        let room = TestRoom::with_retention(2, RetentionPolicy::default(), Some(1));
        let usecase = create_usecase(&room);
        let (alice, mut alice_rx) = room.join("alice").await;
        let image = room
            .repository
            .append_message(
                username("alice"),
                MessageBody::Image(ImageData::new("aGk=".to_string(), 16).unwrap()),
                room.now(),
            )
            .await
            .message;

        // when (操作):
        usecase.execute(alice, "hi".to_string()).await.unwrap();

        // then (期待する結果):
        let events = drain(&mut alice_rx);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            ServerEvent::DeleteMessage {
                id: image.id.value()
            }
        );
        assert!(matches!(events[1], ServerEvent::NewMessage(_)));
    }
}
