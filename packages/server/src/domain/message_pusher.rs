//! メッセージ送信（通知）の trait 定義
//!
//! ## 責務
//!
//! - 接続中のコネクションの管理（登録・登録解除・一覧）
//! - コネクションへの通知の送信（push_to, broadcast）
//!
//! 認証前のコネクションも登録され、ブロードキャストの対象になります。
//! 実装は Infrastructure 層（`infrastructure::message_pusher`）が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Notification};

/// コネクションへ送信するためのチャンネル（エンコード済みのフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// コネクションを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// コネクションの登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 登録中の全コネクション
    async fn connected_clients(&self) -> Vec<ConnectionId>;

    /// 特定のコネクションに送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数のコネクションに送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
