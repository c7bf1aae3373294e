//! Notifications pushed to connections
//!
//! UseCase 層が「何を」知らせるかをドメインの言葉で表したもの。
//! ワイヤ形式（JSON）への変換は Infrastructure 層の DTO が担う。

use super::{
    entity::ChatMessage,
    value_object::{MessageId, Username},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 認証成功（本人のみ）
    AuthSuccess {
        username: Username,
        history: Vec<ChatMessage>,
        users_online: Vec<Username>,
    },
    /// 認証失敗（本人のみ）
    AuthError { message: String },
    /// 新しいメッセージ（全員）
    NewMessage(ChatMessage),
    /// 送信エラー（本人のみ）
    Error { message: String },
    /// 画像メッセージの削除（全員）
    DeleteMessage { id: MessageId },
    /// 入力中（本人以外）
    UserTyping { username: Username },
    /// 入力終了（本人以外）
    UserStopTyping,
    /// 入室（本人以外）
    UserJoined {
        username: Username,
        users_online: Vec<Username>,
    },
    /// 退室（残りの全員）
    UserLeft {
        username: Username,
        users_online: Vec<Username>,
    },
}

impl Notification {
    /// ログ出力用のイベント名
    pub fn event_name(&self) -> &'static str {
        match self {
            Notification::AuthSuccess { .. } => "auth_success",
            Notification::AuthError { .. } => "auth_error",
            Notification::NewMessage(_) => "new_message",
            Notification::Error { .. } => "error",
            Notification::DeleteMessage { .. } => "delete_message",
            Notification::UserTyping { .. } => "user_typing",
            Notification::UserStopTyping => "user_stop_typing",
            Notification::UserJoined { .. } => "user_joined",
            Notification::UserLeft { .. } => "user_left",
        }
    }
}
