//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは Room 集約に対する 1 回の操作に対応し、実装は操作全体を
//! 不可分に行う必要があります（掃除の途中状態や、定員チェックと登録の間に
//! 他の操作が割り込むことがあってはならない）。

use async_trait::async_trait;

use super::{
    AdmissionError, Admission, AppendOutcome, ChatMessage, ConnectionId, Departure, MessageBody,
    MessageId, RoomSnapshot, Timestamp, Username,
};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// セッションを受け入れる（定員・ユーザー名の判定を含む）
    async fn admit(
        &self,
        connection_id: ConnectionId,
        username: String,
        now: Timestamp,
    ) -> Result<Admission, AdmissionError>;

    /// セッションを削除。セッションが無ければ `None`
    async fn remove_session(&self, connection_id: &ConnectionId) -> Option<Departure>;

    /// コネクションに紐づくユーザー名（未認証なら `None`）
    async fn find_username(&self, connection_id: &ConnectionId) -> Option<Username>;

    /// 接続中のユーザー名（入室順）
    async fn roster(&self) -> Vec<Username>;

    /// メッセージを作成・追加し、続けて掃除する
    async fn append_message(
        &self,
        username: Username,
        body: MessageBody,
        now: Timestamp,
    ) -> AppendOutcome;

    /// 期限切れのメッセージを削除し、削除したものを返す
    async fn sweep(&self, now: Timestamp) -> Vec<ChatMessage>;

    /// 指定 ID のメッセージを削除（既に無ければ `None`）
    async fn remove_message(&self, id: MessageId) -> Option<ChatMessage>;

    /// `now` 時点で有効な履歴
    async fn history(&self, now: Timestamp) -> Vec<ChatMessage>;

    /// Room のサマリ
    async fn snapshot(&self) -> RoomSnapshot;
}
