//! WebSocket event DTOs.
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`;
//! events without a payload carry only `event`.

use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Authenticate {
        code: String,
        username: String,
    },
    SendMessage {
        text: String,
    },
    SendImage {
        #[serde(rename = "imageData")]
        image_data: String,
    },
    Typing,
    StopTyping,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    AuthSuccess {
        username: String,
        history: Vec<MessageDto>,
        #[serde(rename = "usersOnline")]
        users_online: Vec<String>,
    },
    AuthError {
        message: String,
    },
    NewMessage(MessageDto),
    Error {
        message: String,
    },
    DeleteMessage {
        id: i64,
    },
    UserTyping {
        username: String,
    },
    UserStopTyping,
    UserJoined {
        username: String,
        #[serde(rename = "usersOnline")]
        users_online: Vec<String>,
    },
    UserLeft {
        username: String,
        #[serde(rename = "usersOnline")]
        users_online: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKindDto {
    Text,
    Image,
}

/// A chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MessageKindDto,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Server local time, `HH:MM`
    pub timestamp: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_authenticate() {
        // テスト項目: authenticate イベントがパースされる
        // given (前提条件):
        let raw = r#"{"event":"authenticate","data":{"code":"noel2025","username":"alice"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Authenticate {
                code: "noel2025".to_string(),
                username: "alice".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_send_image_uses_camel_case() {
        // テスト項目: send_image のペイロードは imageData フィールドで受け取る
        // given (前提条件):
        let raw = r#"{"event":"send_image","data":{"imageData":"aGVsbG8="}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SendImage {
                image_data: "aGVsbG8=".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_payloadless_events() {
        // テスト項目: ペイロードの無い typing / stop_typing がパースされる
        // given (前提条件):
        let typing = r#"{"event":"typing"}"#;
        let stop_typing = r#"{"event":"stop_typing"}"#;

        // when (操作):
        let typing: ClientEvent = serde_json::from_str(typing).unwrap();
        let stop_typing: ClientEvent = serde_json::from_str(stop_typing).unwrap();

        // then (期待する結果):
        assert_eq!(typing, ClientEvent::Typing);
        assert_eq!(stop_typing, ClientEvent::StopTyping);
    }

    #[test]
    fn test_parse_unknown_event_fails() {
        // テスト項目: 未知のイベントはパースエラーになる
        // given (前提条件):
        let raw = r#"{"event":"shout","data":{"text":"hi"}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_text_message() {
        // テスト項目: テキストメッセージは text を持ち imageData / expiresAt を持たない
        // given (前提条件):
        let event = ServerEvent::NewMessage(MessageDto {
            id: 1000,
            kind: MessageKindDto::Text,
            username: "alice".to_string(),
            text: Some("hello".to_string()),
            image_data: None,
            timestamp: "18:30".to_string(),
            created_at: 1000,
            expires_at: None,
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "event": "new_message",
                "data": {
                    "id": 1000,
                    "type": "text",
                    "username": "alice",
                    "text": "hello",
                    "timestamp": "18:30",
                    "createdAt": 1000
                }
            })
        );
    }

    #[test]
    fn test_serialize_user_stop_typing_has_no_payload() {
        // テスト項目: user_stop_typing はペイロード無しで送られる
        // given (前提条件):
        let event = ServerEvent::UserStopTyping;

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"event": "user_stop_typing"}));
    }

    #[test]
    fn test_serialize_user_joined_uses_users_online() {
        // テスト項目: user_joined の名簿は usersOnline フィールドで送られる
        // given (前提条件):
        let event = ServerEvent::UserJoined {
            username: "bob".to_string(),
            users_online: vec!["alice".to_string(), "bob".to_string()],
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "event": "user_joined",
                "data": {"username": "bob", "usersOnline": ["alice", "bob"]}
            })
        );
    }
}
