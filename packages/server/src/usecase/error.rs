//! UseCase errors
//!
//! `Display` の文言はそのままクライアントへのエラーメッセージになります。

use thiserror::Error;

use crate::domain::{AdmissionError, ValueObjectError};

/// 認証のエラー（本人に auth_error として返す）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid access code")]
    InvalidCode,

    #[error("The chat room is full ({capacity} users max)")]
    RoomFull { capacity: usize },

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
}

impl From<AdmissionError> for AuthError {
    fn from(error: AdmissionError) -> Self {
        match error {
            AdmissionError::RoomFull { capacity } => AuthError::RoomFull { capacity },
            AdmissionError::UsernameTaken(name) => AuthError::UsernameTaken(name),
        }
    }
}

/// 画像送信のエラー（本人に error として返す）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendImageError {
    #[error("Image is too large ({len} characters, max {max})")]
    PayloadTooLarge { len: usize, max: usize },
}

impl From<ValueObjectError> for SendImageError {
    fn from(error: ValueObjectError) -> Self {
        match error {
            ValueObjectError::PayloadTooLarge { len, max } => {
                SendImageError::PayloadTooLarge { len, max }
            }
        }
    }
}
