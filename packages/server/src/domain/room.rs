//! Room aggregate
//!
//! 接続中のセッション（名簿）とメッセージ履歴をまとめて保持する集約。
//! 入室判定（定員・ユーザー名の重複）と、種類ごとの TTL による履歴の掃除を担う。
//! 状態の変更はすべてこのメソッド群を通して行い、1 回の呼び出しで完結する。

use std::time::Duration;

use hanare_shared::time::duration_to_millis;

use super::{
    entity::{ChatMessage, MessageBody, MessageKind, Session},
    error::AdmissionError,
    value_object::{ConnectionId, MessageId, Timestamp, Username},
};

/// メッセージ種類ごとの保持期間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub text_ttl: Duration,
    pub image_ttl: Duration,
}

impl RetentionPolicy {
    pub const DEFAULT_TEXT_TTL: Duration = Duration::from_secs(10 * 60);
    pub const DEFAULT_IMAGE_TTL: Duration = Duration::from_secs(60);

    pub fn ttl_for(&self, kind: MessageKind) -> Duration {
        match kind {
            MessageKind::Text => self.text_ttl,
            MessageKind::Image => self.image_ttl,
        }
    }

    /// 作成からの経過時間が TTL 以上なら期限切れ
    pub fn is_expired(&self, message: &ChatMessage, now: Timestamp) -> bool {
        now.millis_since(message.created_at) >= duration_to_millis(self.ttl_for(message.kind()))
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            text_ttl: Self::DEFAULT_TEXT_TTL,
            image_ttl: Self::DEFAULT_IMAGE_TTL,
        }
    }
}

/// 入室成功時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub username: Username,
    /// 入室後の名簿（入室順）
    pub roster: Vec<Username>,
    /// 入室時点で有効な履歴
    pub history: Vec<ChatMessage>,
}

/// 退室時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub username: Username,
    /// 退室後の名簿
    pub roster: Vec<Username>,
}

/// メッセージ追加時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub message: ChatMessage,
    /// 追加に伴って履歴から取り除かれたメッセージ
    pub evicted: Vec<ChatMessage>,
}

/// HTTP の状態確認用のサマリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub users_online: usize,
    pub capacity: usize,
    pub stored_messages: usize,
}

/// Room 集約
#[derive(Debug, Clone)]
pub struct Room {
    sessions: Vec<Session>,
    messages: Vec<ChatMessage>,
    capacity: usize,
    retention: RetentionPolicy,
    history_limit: Option<usize>,
    last_message_id: Option<MessageId>,
}

impl Room {
    /// 定員と保持期間を指定して Room を作成
    pub fn new(capacity: usize, retention: RetentionPolicy) -> Self {
        Self {
            sessions: Vec::new(),
            messages: Vec::new(),
            capacity,
            retention,
            history_limit: None,
            last_message_id: None,
        }
    }

    /// 履歴の件数上限を設定（`None` なら TTL のみで管理）
    pub fn with_history_limit(mut self, history_limit: Option<usize>) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn retention(&self) -> &RetentionPolicy {
        &self.retention
    }

    // ========================================
    // Sessions
    // ========================================

    /// セッションを受け入れる
    ///
    /// 判定順: 定員 → ユーザー名の重複。ユーザー名の内容（空文字など）は問わない。
    /// 既にセッションを持つコネクションの再認証は定員チェックの対象外で、
    /// ユーザー名は置き換えられる（名簿上の位置は変わらない）。
    pub fn admit(
        &mut self,
        connection_id: ConnectionId,
        username: String,
        now: Timestamp,
    ) -> Result<Admission, AdmissionError> {
        let existing = self
            .sessions
            .iter()
            .position(|s| s.connection_id == connection_id);

        if existing.is_none() && self.sessions.len() >= self.capacity {
            return Err(AdmissionError::RoomFull {
                capacity: self.capacity,
            });
        }

        let username = Username::new(username);

        if self
            .sessions
            .iter()
            .any(|s| s.connection_id != connection_id && s.username == username)
        {
            return Err(AdmissionError::UsernameTaken(username.into_string()));
        }

        let session = Session::new(connection_id, username.clone(), now);
        match existing {
            Some(index) => self.sessions[index] = session,
            None => self.sessions.push(session),
        }

        Ok(Admission {
            username,
            roster: self.roster(),
            history: self.history(now),
        })
    }

    /// セッションを取り除く。存在しなければ `None`
    pub fn remove_session(&mut self, connection_id: &ConnectionId) -> Option<Departure> {
        let index = self
            .sessions
            .iter()
            .position(|s| &s.connection_id == connection_id)?;
        let session = self.sessions.remove(index);

        Some(Departure {
            username: session.username,
            roster: self.roster(),
        })
    }

    pub fn session(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| &s.connection_id == connection_id)
    }

    /// 名簿（入室順）
    pub fn roster(&self) -> Vec<Username> {
        self.sessions.iter().map(|s| s.username.clone()).collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    // ========================================
    // Messages
    // ========================================

    /// メッセージを作成して履歴に追加し、直後に掃除する
    pub fn append_message(
        &mut self,
        username: Username,
        body: MessageBody,
        now: Timestamp,
    ) -> AppendOutcome {
        let id = MessageId::next(self.last_message_id, now);
        self.last_message_id = Some(id);

        let expires_at = match body.kind() {
            MessageKind::Image => Some(now.add(self.retention.image_ttl)),
            MessageKind::Text => None,
        };
        let message = ChatMessage {
            id,
            username,
            body,
            created_at: now,
            expires_at,
        };
        self.messages.push(message.clone());

        let mut evicted = self.trim_to_limit();
        evicted.extend(self.sweep(now));

        AppendOutcome { message, evicted }
    }

    /// 期限切れのメッセージを履歴から取り除き、取り除いたものを返す
    pub fn sweep(&mut self, now: Timestamp) -> Vec<ChatMessage> {
        let retention = self.retention;
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .messages
            .drain(..)
            .partition(|m| retention.is_expired(m, now));
        self.messages = kept;
        expired
    }

    /// 指定 ID のメッセージを取り除く。既に無ければ `None`
    pub fn remove_message(&mut self, id: MessageId) -> Option<ChatMessage> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }

    /// `now` の時点で有効な履歴（古い順）
    pub fn history(&self, now: Timestamp) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|m| !self.retention.is_expired(m, now))
            .cloned()
            .collect()
    }

    pub fn stored_message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            users_online: self.sessions.len(),
            capacity: self.capacity,
            stored_messages: self.messages.len(),
        }
    }

    fn trim_to_limit(&mut self) -> Vec<ChatMessage> {
        match self.history_limit {
            Some(limit) if self.messages.len() > limit => {
                let excess = self.messages.len() - limit;
                self.messages.drain(..excess).collect()
            }
            _ => Vec::new(),
        }
    }
}
