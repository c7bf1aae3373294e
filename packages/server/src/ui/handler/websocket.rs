//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::ConnectionId, infrastructure::dto::websocket::ClientEvent, ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards frames queued for this connection to the WebSocket sink.
///
/// Every notification addressed to the connection (by any use case, including
/// background expiry tasks) arrives through `rx`.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection '{}' established", connection_id);

    // Create a channel for this connection to receive notifications
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_client_usecase
        .execute(connection_id, tx)
        .await;

    let (sender, receiver) = socket.split();

    let state_clone = state.clone();
    let mut recv_task =
        tokio::spawn(async move { receive_loop(receiver, state_clone, connection_id).await });
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => dispatch(&state, connection_id, event).await,
                Err(e) => {
                    tracing::warn!("Ignored malformed frame from '{}': {}", connection_id, e);
                }
            },
            Message::Ping(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                tracing::trace!("Received ping from '{}'", connection_id);
            }
            Message::Close(_) => {
                tracing::debug!("Connection '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}

/// Routes one client event to its use case
async fn dispatch(state: &AppState, connection_id: ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::Authenticate { code, username } => {
            if let Err(e) = state
                .authenticate_participant_usecase
                .execute(connection_id, &code, username)
                .await
            {
                tracing::debug!("Authentication failed for '{}': {}", connection_id, e);
            }
        }
        ClientEvent::SendMessage { text } => {
            state
                .send_message_usecase
                .execute(connection_id, text)
                .await;
        }
        ClientEvent::SendImage { image_data } => {
            if let Err(e) = state
                .send_image_usecase
                .execute(connection_id, image_data)
                .await
            {
                tracing::debug!("Image rejected for '{}': {}", connection_id, e);
            }
        }
        ClientEvent::Typing => {
            state.typing_usecase.start(connection_id).await;
        }
        ClientEvent::StopTyping => {
            state.typing_usecase.stop(connection_id).await;
        }
    }
}
