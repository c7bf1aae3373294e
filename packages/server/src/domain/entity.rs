//! Entities

use super::value_object::{ConnectionId, ImageData, MessageId, Timestamp, Username};

/// 認証済みのコネクションとユーザー名の結び付き
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub authenticated_at: Timestamp,
}

impl Session {
    pub fn new(connection_id: ConnectionId, username: Username, authenticated_at: Timestamp) -> Self {
        Self {
            connection_id,
            username,
            authenticated_at,
        }
    }
}

/// メッセージの種類。保持期間（TTL）はこれだけで決まる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Image,
}

/// メッセージ本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Image(ImageData),
}

impl MessageBody {
    pub fn kind(&self) -> MessageKind {
        match self {
            MessageBody::Text(_) => MessageKind::Text,
            MessageBody::Image(_) => MessageKind::Image,
        }
    }
}

/// チャットメッセージ（作成後は不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub username: Username,
    pub body: MessageBody,
    pub created_at: Timestamp,
    /// 画像のみ。作成時刻 + 画像の TTL
    pub expires_at: Option<Timestamp>,
}

impl ChatMessage {
    pub fn kind(&self) -> MessageKind {
        self.body.kind()
    }

    pub fn is_image(&self) -> bool {
        self.kind() == MessageKind::Image
    }
}
