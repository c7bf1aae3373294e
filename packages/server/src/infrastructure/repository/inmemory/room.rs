//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! Room 集約を `tokio::sync::Mutex` で保護し、各操作を 1 回のロック取得の中で
//! 完結させることで、操作同士が部分的に見えることを防ぎます。
//!
//! 再起動をまたいだ永続化は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Admission, AdmissionError, AppendOutcome, ChatMessage, ConnectionId, Departure, MessageBody,
    MessageId, Room, RoomRepository, RoomSnapshot, Timestamp, Username,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ドメインモデル
    room: Arc<Mutex<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(room: Arc<Mutex<Room>>) -> Self {
        Self { room }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn admit(
        &self,
        connection_id: ConnectionId,
        username: String,
        now: Timestamp,
    ) -> Result<Admission, AdmissionError> {
        let mut room = self.room.lock().await;
        room.admit(connection_id, username, now)
    }

    async fn remove_session(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let mut room = self.room.lock().await;
        room.remove_session(connection_id)
    }

    async fn find_username(&self, connection_id: &ConnectionId) -> Option<Username> {
        let room = self.room.lock().await;
        room.session(connection_id).map(|s| s.username.clone())
    }

    async fn roster(&self) -> Vec<Username> {
        let room = self.room.lock().await;
        room.roster()
    }

    async fn append_message(
        &self,
        username: Username,
        body: MessageBody,
        now: Timestamp,
    ) -> AppendOutcome {
        let mut room = self.room.lock().await;
        room.append_message(username, body, now)
    }

    async fn sweep(&self, now: Timestamp) -> Vec<ChatMessage> {
        let mut room = self.room.lock().await;
        room.sweep(now)
    }

    async fn remove_message(&self, id: MessageId) -> Option<ChatMessage> {
        let mut room = self.room.lock().await;
        room.remove_message(id)
    }

    async fn history(&self, now: Timestamp) -> Vec<ChatMessage> {
        let room = self.room.lock().await;
        room.history(now)
    }

    async fn snapshot(&self) -> RoomSnapshot {
        let room = self.room.lock().await;
        room.snapshot()
    }
}
