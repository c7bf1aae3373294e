//! Conversion logic between DTOs and domain entities.

use hanare_shared::time::format_local_clock_time;

use crate::domain::{ChatMessage, MessageBody, Notification, Username};
use crate::infrastructure::dto::websocket::{MessageDto, MessageKindDto, ServerEvent};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ChatMessage> for MessageDto {
    fn from(model: &ChatMessage) -> Self {
        let (kind, text, image_data) = match &model.body {
            MessageBody::Text(text) => (MessageKindDto::Text, Some(text.clone()), None),
            MessageBody::Image(data) => (
                MessageKindDto::Image,
                None,
                Some(data.as_str().to_string()),
            ),
        };

        Self {
            id: model.id.value(),
            kind,
            username: model.username.as_str().to_string(),
            text,
            image_data,
            timestamp: format_local_clock_time(model.created_at.value()),
            created_at: model.created_at.value(),
            expires_at: model.expires_at.map(|t| t.value()),
        }
    }
}

impl From<&Notification> for ServerEvent {
    fn from(notification: &Notification) -> Self {
        match notification {
            Notification::AuthSuccess {
                username,
                history,
                users_online,
            } => ServerEvent::AuthSuccess {
                username: username.as_str().to_string(),
                history: history.iter().map(MessageDto::from).collect(),
                users_online: usernames(users_online),
            },
            Notification::AuthError { message } => ServerEvent::AuthError {
                message: message.clone(),
            },
            Notification::NewMessage(message) => ServerEvent::NewMessage(message.into()),
            Notification::Error { message } => ServerEvent::Error {
                message: message.clone(),
            },
            Notification::DeleteMessage { id } => ServerEvent::DeleteMessage { id: id.value() },
            Notification::UserTyping { username } => ServerEvent::UserTyping {
                username: username.as_str().to_string(),
            },
            Notification::UserStopTyping => ServerEvent::UserStopTyping,
            Notification::UserJoined {
                username,
                users_online,
            } => ServerEvent::UserJoined {
                username: username.as_str().to_string(),
                users_online: usernames(users_online),
            },
            Notification::UserLeft {
                username,
                users_online,
            } => ServerEvent::UserLeft {
                username: username.as_str().to_string(),
                users_online: usernames(users_online),
            },
        }
    }
}

fn usernames(roster: &[Username]) -> Vec<String> {
    roster.iter().map(|u| u.as_str().to_string()).collect()
}
