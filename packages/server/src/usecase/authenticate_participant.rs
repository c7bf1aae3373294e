//! UseCase: 認証（入室）処理
//!
//! ## 判定の順序
//!
//! 1. アクセスコードの完全一致
//! 2. 定員（同じコネクションの再認証は対象外）
//! 3. ユーザー名が他のセッションと重複しないこと（空文字も 1 つの名前として扱う）
//!
//! 失敗時は本人にだけ `auth_error` を返し、コネクションは開いたまま再試行を受け付ける。
//! 成功時は本人に `auth_success`（履歴と在室者一覧）を返し、他の全コネクションに `user_joined` を送る。

use std::sync::Arc;

use hanare_shared::time::Clock;

use crate::domain::{
    AccessCode, Admission, ConnectionId, MessagePusher, Notification, RoomRepository, Timestamp,
};

use super::{all_except, error::AuthError};

/// 認証のユースケース
pub struct AuthenticateParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    access_code: AccessCode,
}

impl AuthenticateParticipantUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        access_code: AccessCode,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            access_code,
        }
    }

    /// 認証を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Admission)` - 入室した（または再認証した）セッションの情報
    /// * `Err(AuthError)` - 拒否。本人には `auth_error` が送信済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        code: &str,
        username: String,
    ) -> Result<Admission, AuthError> {
        match self.admit(connection_id, code, username).await {
            Ok(admission) => {
                self.announce_admission(connection_id, &admission).await;
                Ok(admission)
            }
            Err(error) => {
                tracing::warn!(
                    "Authentication rejected for connection '{}': {}",
                    connection_id,
                    error
                );
                let notification = Notification::AuthError {
                    message: error.to_string(),
                };
                if let Err(e) = self
                    .message_pusher
                    .push_to(&connection_id, &notification)
                    .await
                {
                    tracing::warn!("Failed to push auth_error to '{}': {}", connection_id, e);
                }
                Err(error)
            }
        }
    }

    async fn admit(
        &self,
        connection_id: ConnectionId,
        code: &str,
        username: String,
    ) -> Result<Admission, AuthError> {
        if !self.access_code.matches(code) {
            return Err(AuthError::InvalidCode);
        }

        let now = Timestamp::new(self.clock.now_millis());
        let admission = self.repository.admit(connection_id, username, now).await?;
        Ok(admission)
    }

    async fn announce_admission(&self, connection_id: ConnectionId, admission: &Admission) {
        // 1. 本人に履歴と在室者一覧を返す
        let success = Notification::AuthSuccess {
            username: admission.username.clone(),
            history: admission.history.clone(),
            users_online: admission.roster.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &success).await {
            tracing::warn!("Failed to push auth_success to '{}': {}", connection_id, e);
        }

        // 2. 他の全コネクションに入室を知らせる
        let targets = all_except(
            self.message_pusher.connected_clients().await,
            &connection_id,
        );
        let joined = Notification::UserJoined {
            username: admission.username.clone(),
            users_online: admission.roster.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &joined).await {
            tracing::warn!("Failed to broadcast user_joined: {}", e);
        }

        tracing::info!(
            "'{}' joined the chat ({} online)",
            admission.username,
            admission.roster.len()
        );
    }
}
