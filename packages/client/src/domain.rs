//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::ClientError;

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send the line as a text message
    Text(String),
    /// `/image <path>`: send the file as an image message
    Image(PathBuf),
    /// `/quit`
    Quit,
}

/// Interpret one input line. Blank lines yield `None`.
pub fn parse_input(line: &str) -> Option<InputCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed == "/quit" {
        return Some(InputCommand::Quit);
    }
    if let Some(path) = trimmed.strip_prefix("/image ") {
        let path = path.trim();
        if !path.is_empty() {
            return Some(InputCommand::Image(PathBuf::from(path)));
        }
    }

    Some(InputCommand::Text(trimmed.to_string()))
}

/// Base64 payload for `send_image`
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Check if the client should exit immediately based on the error type.
///
/// Rejected credentials will be rejected again, so retrying is pointless.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::AuthRejected(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
