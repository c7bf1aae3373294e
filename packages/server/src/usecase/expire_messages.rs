//! UseCase: メッセージの期限切れ処理
//!
//! 履歴からメッセージが取り除かれる経路は 4 つある。
//!
//! - 画像ごとの遅延削除（[`ExpireMessagesUseCase::schedule_expiry`]）
//! - 定期的な掃除（[`ExpireMessagesUseCase::spawn_periodic_sweep`]）
//! - 送信直後の掃除（SendMessageUseCase / SendImageUseCase）
//! - 件数上限による切り詰め（同上）
//!
//! どの経路でも、取り除かれた画像 1 件につき `delete_message` をちょうど 1 回だけ全コネクションに送る。
//! テキストの削除は通知しない。

use std::{sync::Arc, time::Duration};

use hanare_shared::time::Clock;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::domain::{
    ChatMessage, MessageId, MessagePusher, Notification, RoomRepository, Timestamp,
};

/// メッセージの期限切れ処理のユースケース
pub struct ExpireMessagesUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ExpireMessagesUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 指定 ID のメッセージを取り除く
    ///
    /// 既に別の経路で取り除かれていれば何もしない。
    pub async fn expire(&self, id: MessageId) -> Option<ChatMessage> {
        let Some(message) = self.repository.remove_message(id).await else {
            tracing::debug!("Message {} already removed", id);
            return None;
        };

        self.announce_evictions(std::slice::from_ref(&message)).await;
        Some(message)
    }

    /// 期限切れのメッセージを全て取り除く
    pub async fn sweep(&self) -> Vec<ChatMessage> {
        let now = Timestamp::new(self.clock.now_millis());
        let evicted = self.repository.sweep(now).await;

        if !evicted.is_empty() {
            tracing::debug!("Swept {} expired message(s)", evicted.len());
        }
        self.announce_evictions(&evicted).await;
        evicted
    }

    /// 取り除かれた画像を全コネクションに知らせる
    pub async fn announce_evictions(&self, evicted: &[ChatMessage]) {
        let images: Vec<MessageId> = evicted
            .iter()
            .filter(|m| m.is_image())
            .map(|m| m.id)
            .collect();
        if images.is_empty() {
            return;
        }

        let targets = self.message_pusher.connected_clients().await;
        for id in images {
            let notification = Notification::DeleteMessage { id };
            if let Err(e) = self
                .message_pusher
                .broadcast(targets.clone(), &notification)
                .await
            {
                tracing::warn!("Failed to broadcast delete_message for {}: {}", id, e);
            }
            tracing::info!("Image message {} expired", id);
        }
    }

    /// `delay` 後に指定 ID のメッセージを取り除くタスクを起動する
    pub fn schedule_expiry(self: &Arc<Self>, id: MessageId, delay: Duration) -> JoinHandle<()> {
        let usecase = Arc::clone(self);
        tokio::spawn(async move {
            time::sleep(delay).await;
            usecase.expire(id).await;
        })
    }

    /// `every` ごとに掃除するタスクを起動する
    pub fn spawn_periodic_sweep(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let usecase = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 最初の tick は即座に完了する
            ticker.tick().await;
            loop {
                ticker.tick().await;
                usecase.sweep().await;
            }
        })
    }
}
