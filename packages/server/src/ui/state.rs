//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    AuthenticateParticipantUseCase, ConnectClientUseCase, DisconnectParticipantUseCase,
    ExpireMessagesUseCase, GetRoomStatusUseCase, SendImageUseCase, SendMessageUseCase,
    TypingUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（コネクション確立のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// AuthenticateParticipantUseCase（認証のユースケース）
    pub authenticate_participant_usecase: Arc<AuthenticateParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（テキスト送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// SendImageUseCase（画像送信のユースケース）
    pub send_image_usecase: Arc<SendImageUseCase>,
    /// TypingUseCase（入力中表示のユースケース）
    pub typing_usecase: Arc<TypingUseCase>,
    /// ExpireMessagesUseCase（期限切れ処理のユースケース）
    pub expire_messages_usecase: Arc<ExpireMessagesUseCase>,
    /// GetRoomStatusUseCase（ルーム状態取得のユースケース）
    pub get_room_status_usecase: Arc<GetRoomStatusUseCase>,
}
