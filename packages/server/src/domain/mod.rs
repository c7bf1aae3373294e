//! Domain layer
//!
//! チャットの中核となるモデルと、外側の層が実装すべきインターフェースを定義します。
//!
//! - `value_object`: ConnectionId / Username / MessageId などの値オブジェクト
//! - `entity`: Session / ChatMessage エンティティ
//! - `room`: セッションとメッセージ履歴をまとめる集約（Room）
//! - `repository`: Room へのデータアクセスの trait（Infrastructure 層が実装）
//! - `message_pusher`: クライアントへの通知の trait（Infrastructure 層が実装）

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod notification;
pub mod repository;
pub mod room;
pub mod value_object;

pub use entity::{ChatMessage, MessageBody, MessageKind, Session};
pub use error::{AdmissionError, MessagePushError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use repository::RoomRepository;
pub use room::{Admission, AppendOutcome, Departure, RetentionPolicy, Room, RoomSnapshot};
pub use value_object::{AccessCode, ConnectionId, ImageData, MessageId, Timestamp, Username};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
