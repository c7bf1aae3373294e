//! Domain errors

use thiserror::Error;

/// 値オブジェクトの生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 画像データが上限を超えている
    #[error("image payload is too large ({len} > {max} characters)")]
    PayloadTooLarge { len: usize, max: usize },
}

/// セッションの受け入れ（入室）に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// 同時接続数の上限に達している
    #[error("room is full ({capacity} users max)")]
    RoomFull { capacity: usize },

    /// 他のセッションが同じユーザー名を使用中
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のコネクションが見つからない
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗した
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// 通知のシリアライズに失敗した
    #[error("failed to encode notification: {0}")]
    EncodeFailed(String),
}
