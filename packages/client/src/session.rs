//! WebSocket client session management.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use hanare_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::error::ClientError;

use super::{
    domain::{InputCommand, encode_image, parse_input},
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user quits, `Err(AuthRejected)` when the server
/// refuses the credentials, and `Err(ConnectionError)` when the connection is lost.
pub async fn run_client_session(
    url: &str,
    code: &str,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    send_event(
        &mut write,
        &ClientEvent::Authenticate {
            code: code.to_string(),
            username: username.to_string(),
        },
    )
    .await?;
    let banner = wait_for_admission(&mut read, username).await?;
    print!("{}", banner);
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /image <path> sends a picture, /quit exits.\n",
        username
    );
    redisplay_prompt(username);

    // Spawn a task to handle incoming events
    let me = username.to_string();
    let mut read_task = tokio::spawn(async move { read_loop(read, me).await });

    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        result = forward_input(&mut write, input_rx, username) => {
            read_task.abort();
            result
        }
    }
}

async fn send_event(write: &mut WsWriter, event: &ClientEvent) -> Result<(), ClientError> {
    let json = serde_json::to_string(event)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Wait for the answer to `authenticate`
///
/// Broadcasts reach unauthenticated connections too, so unrelated events are skipped.
async fn wait_for_admission(read: &mut WsReader, username: &str) -> Result<String, ClientError> {
    while let Some(message) = read.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
        };

        match serde_json::from_str::<ServerEvent>(text.as_str()) {
            Ok(event @ ServerEvent::AuthSuccess { .. }) => {
                return Ok(MessageFormatter::format_event(&event, username));
            }
            Ok(ServerEvent::AuthError { message }) => {
                return Err(ClientError::AuthRejected(message));
            }
            Ok(other) => tracing::debug!("Skipped event before authentication: {:?}", other),
            Err(e) => tracing::warn!("Ignored unknown frame: {}", e),
        }
    }

    Err(ClientError::ConnectionError(
        "Connection closed before authentication".to_string(),
    ))
}

async fn read_loop(mut read: WsReader, me: String) {
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(text.as_str()) {
                Ok(event) => {
                    let formatted = MessageFormatter::format_event(&event, &me);
                    if !formatted.is_empty() {
                        print!("{}", formatted);
                        redisplay_prompt(&me);
                    }
                }
                Err(e) => tracing::warn!("Ignored unknown frame: {}", e),
            },
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
            _ => {}
        }
    }
}

/// Send typed lines until `/quit` or end of input
async fn forward_input(
    write: &mut WsWriter,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    username: &str,
) -> Result<(), ClientError> {
    while let Some(line) = input_rx.recv().await {
        let Some(command) = parse_input(&line) else {
            redisplay_prompt(username);
            continue;
        };

        let event = match command {
            InputCommand::Quit => break,
            InputCommand::Text(text) => ClientEvent::SendMessage { text },
            InputCommand::Image(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => ClientEvent::SendImage {
                    image_data: encode_image(&bytes),
                },
                Err(e) => {
                    println!("\n! Cannot read {}: {}", path.display(), e);
                    redisplay_prompt(username);
                    continue;
                }
            },
        };

        send_event(write, &event).await?;
    }

    write.close().await.ok();
    Ok(())
}
