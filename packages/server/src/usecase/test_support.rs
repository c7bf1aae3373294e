//! UseCase テスト用のフィクスチャ
//!
//! 本物の InMemoryRoomRepository と WebSocketMessagePusher を組み立て、
//! 各コネクションの受信側（mpsc::UnboundedReceiver）から ServerEvent を読み出せるようにする。

use std::{collections::HashMap, sync::Arc, time::Duration};

use hanare_shared::time::{Clock, ManualClock};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        ConnectionId, MessagePusher, RetentionPolicy, Room, RoomRepository, Timestamp, Username,
    },
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
};

use super::ExpireMessagesUseCase;

/// 2025-12-24T18:30:15Z
pub const T0: i64 = 1_766_601_015_000;

pub struct TestRoom {
    pub repository: Arc<InMemoryRoomRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<ManualClock>,
}

impl TestRoom {
    pub fn new(capacity: usize) -> Self {
        Self::with_retention(capacity, RetentionPolicy::default(), None)
    }

    pub fn with_retention(
        capacity: usize,
        retention: RetentionPolicy,
        history_limit: Option<usize>,
    ) -> Self {
        let room = Room::new(capacity, retention).with_history_limit(history_limit);
        Self {
            repository: Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(room)))),
            pusher: Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
                HashMap::new(),
            )))),
            clock: Arc::new(ManualClock::new(T0)),
        }
    }

    pub fn repository(&self) -> Arc<dyn RoomRepository> {
        self.repository.clone()
    }

    pub fn pusher(&self) -> Arc<dyn MessagePusher> {
        self.pusher.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    pub fn advance(&self, duration: Duration) {
        self.clock.advance(duration);
    }

    pub fn expire_messages(&self) -> Arc<ExpireMessagesUseCase> {
        Arc::new(ExpireMessagesUseCase::new(
            self.repository(),
            self.pusher(),
            self.clock(),
        ))
    }

    /// 未認証のコネクションを 1 つ開く
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(connection_id, tx).await;
        (connection_id, rx)
    }

    /// コネクションを開いて認証済みにする（通知は送らない）
    pub async fn join(&self, name: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection_id, rx) = self.connect().await;
        self.repository
            .admit(connection_id, name.to_string(), self.now())
            .await
            .unwrap();
        (connection_id, rx)
    }
}

pub fn username(name: &str) -> Username {
    Username::new(name.to_string())
}

/// 受信済みのフレームを全て ServerEvent にデコードして取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}
