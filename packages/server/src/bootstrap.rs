//! Dependency wiring.

use std::{collections::HashMap, sync::Arc};

use hanare_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::ChatConfig,
    domain::{AccessCode, MessagePusher, Room, RoomRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
    },
    ui::state::AppState,
    usecase::{
        AuthenticateParticipantUseCase, ConnectClientUseCase, DisconnectParticipantUseCase,
        ExpireMessagesUseCase, GetRoomStatusUseCase, SendImageUseCase, SendMessageUseCase,
        TypingUseCase,
    },
};

/// Build the application state from the configuration
///
/// Initialize dependencies in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. UseCases
/// 4. AppState
pub fn build_app_state(config: &ChatConfig, clock: Arc<dyn Clock>) -> Arc<AppState> {
    // 1. Create Repository (in-memory database)
    let room = Room::new(config.max_users, config.retention)
        .with_history_limit(config.history_limit);
    let repository: Arc<dyn RoomRepository> =
        Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(room))));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new(
        Arc::new(Mutex::new(HashMap::new())),
    ));

    // 3. Create UseCases
    let expire_messages_usecase = Arc::new(ExpireMessagesUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let authenticate_participant_usecase = Arc::new(AuthenticateParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        AccessCode::new(config.access_code.clone()),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        expire_messages_usecase.clone(),
    ));
    let send_image_usecase = Arc::new(SendImageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock,
        expire_messages_usecase.clone(),
        config.max_image_chars,
        config.retention.image_ttl,
    ));
    let typing_usecase = Arc::new(TypingUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_room_status_usecase = Arc::new(GetRoomStatusUseCase::new(repository));

    // 4. Create AppState
    Arc::new(AppState {
        connect_client_usecase,
        authenticate_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        send_image_usecase,
        typing_usecase,
        expire_messages_usecase,
        get_room_status_usecase,
    })
}
