//! UseCase: ルームの状態取得

use std::sync::Arc;

use crate::domain::{RoomRepository, RoomSnapshot};

pub struct GetRoomStatusUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomStatusUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> RoomSnapshot {
        self.repository.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::TestRoom;

    #[tokio::test]
    async fn test_room_status_counts() {
        // テスト項目: 在室人数・定員・保存件数が返される
        // given (前提条件):
        let room = TestRoom::new(3);
        let usecase = GetRoomStatusUseCase::new(room.repository());
        let (_alice, _rx) = room.join("alice").await;
        let (_guest, _guest_rx) = room.connect().await;

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            snapshot,
            RoomSnapshot {
                users_online: 1,
                capacity: 3,
                stored_messages: 0,
            }
        );
    }
}
