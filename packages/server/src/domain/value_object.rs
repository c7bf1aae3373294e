//! Value objects
//!
//! 不変で、値そのものが同一性を表すドメインの基本型。

use std::{fmt, time::Duration};

use hanare_shared::time::duration_to_millis;
use uuid::Uuid;

use super::error::ValueObjectError;

/// WebSocket コネクションの識別子
///
/// 認証の有無に関係なく、接続ごとに 1 つ払い出される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい ConnectionId を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// ユーザー名
///
/// 大文字・小文字を区別し、完全一致で比較する。空文字も 1 つの名前として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 共有アクセスコード
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCode(String);

impl AccessCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 入力されたコードが完全一致するか
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

// コードそのものをログに出さない
impl fmt::Debug for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCode(***)")
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `duration` 後のタイムスタンプ
    pub fn add(&self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration_to_millis(duration)))
    }

    /// `earlier` からの経過時間（ミリ秒）。過去方向は 0 に丸める
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0).max(0)
    }
}

/// メッセージ ID
///
/// 作成時刻（ミリ秒）を基にしつつ、プロセス内で狭義単調増加するように採番される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(i64);

impl MessageId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// 直前の ID と現在時刻から次の ID を決める
    ///
    /// 同一ミリ秒内の連続送信や時計の巻き戻りがあっても重複しない。
    pub fn next(previous: Option<MessageId>, now: Timestamp) -> Self {
        match previous {
            Some(prev) if prev.0 >= now.value() => Self(prev.0 + 1),
            _ => Self(now.value()),
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Base64 でエンコードされた画像データ
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData(String);

impl ImageData {
    /// `max_chars` 文字を超える場合は `PayloadTooLarge`
    pub fn new(value: String, max_chars: usize) -> Result<Self, ValueObjectError> {
        let len = value.chars().count();
        if len > max_chars {
            return Err(ValueObjectError::PayloadTooLarge {
                len,
                max: max_chars,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// 数 MiB になり得るのでログには長さだけ出す
impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageData({} bytes)", self.0.len())
    }
}
