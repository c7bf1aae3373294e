//! Message formatting utilities for client display.

use hanare_server::infrastructure::dto::websocket::{MessageDto, MessageKindDto, ServerEvent};
use hanare_shared::time::format_local_clock_time;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server event for the terminal
    ///
    /// `me` is the username of this client, used to mark own messages.
    pub fn format_event(event: &ServerEvent, me: &str) -> String {
        match event {
            ServerEvent::AuthSuccess {
                username,
                history,
                users_online,
            } => Self::format_auth_success(username, history, users_online),
            ServerEvent::AuthError { message } => {
                format!("\n! Authentication failed: {}\n", message)
            }
            ServerEvent::NewMessage(message) => Self::format_message(message, me),
            ServerEvent::Error { message } => format!("\n! {}\n", message),
            ServerEvent::DeleteMessage { id } => format!("\n~ image {} has disappeared\n", id),
            ServerEvent::UserTyping { username } => format!("\n... {} is typing\n", username),
            ServerEvent::UserStopTyping => String::new(),
            ServerEvent::UserJoined {
                username,
                users_online,
            } => format!("\n+ {} joined ({} online)\n", username, users_online.len()),
            ServerEvent::UserLeft {
                username,
                users_online,
            } => format!("\n- {} left ({} online)\n", username, users_online.len()),
        }
    }

    /// Format the welcome banner with the online roster and the history
    ///
    /// # Arguments
    ///
    /// * `username` - The name this client was admitted under
    /// * `history` - Unexpired messages, oldest first
    /// * `users_online` - The roster, in admission order
    pub fn format_auth_success(
        username: &str,
        history: &[MessageDto],
        users_online: &[String],
    ) -> String {
        let mut output = String::new();
        output.push_str("\n\n");
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!("Welcome, {}!\n", username));

        let roster: Vec<String> = users_online
            .iter()
            .map(|name| {
                if name == username {
                    format!("{} (me)", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        output.push_str(&format!("Online: {}\n", roster.join(", ")));

        output.push_str(RULE);
        output.push('\n');
        if history.is_empty() {
            output.push_str("(No messages)\n");
        } else {
            for message in history {
                output.push_str(Self::format_message(message, username).trim_start());
            }
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a chat message
    ///
    /// Text shows the body; images show their approximate size and the time they disappear.
    pub fn format_message(message: &MessageDto, me: &str) -> String {
        let me_suffix = if message.username == me { " (me)" } else { "" };
        let body = match message.kind {
            MessageKindDto::Text => message.text.clone().unwrap_or_default(),
            MessageKindDto::Image => {
                let size = message
                    .image_data
                    .as_deref()
                    .map(approximate_kib)
                    .unwrap_or(0);
                match message.expires_at {
                    Some(expires_at) => format!(
                        "[image #{}, {} KiB, disappears at {}]",
                        message.id,
                        size,
                        format_local_clock_time(expires_at)
                    ),
                    None => format!("[image #{}, {} KiB]", message.id, size),
                }
            }
        };

        format!(
            "\n[{}] @{}{}: {}\n",
            message.timestamp, message.username, me_suffix, body
        )
    }
}

/// Decoded size of a base64 payload, rounded up to KiB
fn approximate_kib(base64: &str) -> usize {
    let bytes = base64.len() / 4 * 3;
    bytes.div_ceil(1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(username: &str, text: &str) -> MessageDto {
        MessageDto {
            id: 1_766_601_015_000,
            kind: MessageKindDto::Text,
            username: username.to_string(),
            text: Some(text.to_string()),
            image_data: None,
            timestamp: "18:30".to_string(),
            created_at: 1_766_601_015_000,
            expires_at: None,
        }
    }

    #[test]
    fn test_format_text_message() {
        // テスト項目: テキストメッセージは時刻・送信者・本文の形式で表示される
        // given (前提条件):
        let message = text_message("alice", "hello");

        // when (操作):
        let formatted = MessageFormatter::format_message(&message, "bob");

        // then (期待する結果):
        assert_eq!(formatted, "\n[18:30] @alice: hello\n");
    }

    #[test]
    fn test_format_own_message_is_marked() {
        // テスト項目: 自分のメッセージには (me) が付く
        // given (前提条件):
        let message = text_message("alice", "hello");

        // when (操作):
        let formatted = MessageFormatter::format_message(&message, "alice");

        // then (期待する結果):
        assert_eq!(formatted, "\n[18:30] @alice (me): hello\n");
    }

    #[test]
    fn test_format_image_message() {
        // テスト項目: 画像メッセージはサイズと消える時刻を表示し、データ自体は表示しない
        // given (前提条件):
        let data = "A".repeat(4096);
        let message = MessageDto {
            kind: MessageKindDto::Image,
            text: None,
            image_data: Some(data.clone()),
            expires_at: Some(1_766_601_075_000),
            ..text_message("alice", "")
        };

        // when (操作):
        let formatted = MessageFormatter::format_message(&message, "bob");

        // then (期待する結果):
        assert!(
            formatted.starts_with("\n[18:30] @alice: [image #1766601015000, 3 KiB, disappears at ")
        );
        assert!(!formatted.contains(&data));
    }

    #[test]
    fn test_format_auth_success_with_empty_history() {
        // テスト項目: 認証成功時は在室者一覧（自分に (me)）と空の履歴が表示される
        // given (前提条件):
        let users = vec!["alice".to_string(), "bob".to_string()];

        // when (操作):
        let formatted = MessageFormatter::format_auth_success("bob", &[], &users);

        // then (期待する結果):
        assert!(formatted.contains("Welcome, bob!\n"));
        assert!(formatted.contains("Online: alice, bob (me)\n"));
        assert!(formatted.contains("(No messages)\n"));
    }

    #[test]
    fn test_format_auth_success_with_history() {
        // テスト項目: 履歴は古い順に 1 行ずつ表示される
        // given (前提条件):
        let history = vec![text_message("alice", "first"), text_message("bob", "second")];
        let users = vec!["alice".to_string(), "bob".to_string()];

        // when (操作):
        let formatted = MessageFormatter::format_auth_success("bob", &history, &users);

        // then (期待する結果):
        let first = formatted.find("@alice: first").unwrap();
        let second = formatted.find("@bob (me): second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_format_presence_events() {
        // テスト項目: 入退室・削除・入力中の通知の表示
        // given (前提条件):
        let users = vec!["alice".to_string()];

        // when (操作) / then (期待する結果):
        assert_eq!(
            MessageFormatter::format_event(
                &ServerEvent::UserJoined {
                    username: "bob".to_string(),
                    users_online: vec!["alice".to_string(), "bob".to_string()],
                },
                "alice"
            ),
            "\n+ bob joined (2 online)\n"
        );
        assert_eq!(
            MessageFormatter::format_event(
                &ServerEvent::UserLeft {
                    username: "bob".to_string(),
                    users_online: users,
                },
                "alice"
            ),
            "\n- bob left (1 online)\n"
        );
        assert_eq!(
            MessageFormatter::format_event(&ServerEvent::DeleteMessage { id: 42 }, "alice"),
            "\n~ image 42 has disappeared\n"
        );
        assert_eq!(
            MessageFormatter::format_event(&ServerEvent::UserStopTyping, "alice"),
            ""
        );
    }

    #[test]
    fn test_approximate_kib() {
        // テスト項目: base64 の長さから元のサイズを KiB 単位（切り上げ）で求める
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(approximate_kib(""), 0);
        assert_eq!(approximate_kib("aGk="), 1);
        assert_eq!(approximate_kib(&"A".repeat(1364)), 1);
        assert_eq!(approximate_kib(&"A".repeat(1368)), 2);
    }
}
