//! UseCase layer
//!
//! 各ユースケースは Repository と MessagePusher（いずれもドメイン層の trait）に依存し、
//! 状態の変更とコネクションへの通知をまとめて行います。

mod authenticate_participant;
mod connect_client;
mod disconnect_participant;
mod error;
mod expire_messages;
mod get_room_status;
mod send_image;
mod send_message;
mod typing;

#[cfg(test)]
mod test_support;

pub use authenticate_participant::AuthenticateParticipantUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{AuthError, SendImageError};
pub use expire_messages::ExpireMessagesUseCase;
pub use get_room_status::GetRoomStatusUseCase;
pub use send_image::SendImageUseCase;
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;

use crate::domain::ConnectionId;

/// `exclude` 以外の全てのコネクション
fn all_except(connections: Vec<ConnectionId>, exclude: &ConnectionId) -> Vec<ConnectionId> {
    connections
        .into_iter()
        .filter(|id| id != exclude)
        .collect()
}
