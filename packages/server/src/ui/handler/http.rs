//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RoomStatusDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current occupancy of the chat room
pub async fn room_status(State(state): State<Arc<AppState>>) -> Json<RoomStatusDto> {
    let snapshot = state.get_room_status_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(RoomStatusDto {
        users_online: snapshot.users_online,
        capacity: snapshot.capacity,
        messages: snapshot.stored_messages,
    })
}
