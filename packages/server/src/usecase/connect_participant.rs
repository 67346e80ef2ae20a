//! UseCase: 参加者接続処理（ハンドシェイク）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - ハンドシェイクの検証（必須パラメータ、チャンネル存在、パスワード）
//!
//! ### なぜこのテストが必要か
//! - 拒否された接続が Registry に一切の痕跡を残さないことを保証する
//! - 参加成功時に setup-client が本人にのみ送られることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：global / パスワード付きチャンネルへの参加
//! - 異常系：パラメータ欠落、未知のチャンネル、パスワード不一致

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{
        Avatar, ChannelName, Connection, ConnectionId, ConnectionIdFactory, DisplayName,
        PusherChannel, Registry, ValueObjectError,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::{error::HandshakeError, notifier::Notifier};

/// Identity parameters taken from the upgrade request's query string
#[derive(Debug, Clone, Default)]
pub struct JoinRequest {
    pub name: Option<String>,
    pub lobby: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<Mutex<Registry>>,
    notifier: Arc<Notifier>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>, notifier: Arc<Notifier>) -> Self {
        Self { registry, notifier }
    }

    /// 参加者接続を実行
    ///
    /// On success the connection is registered in the global table and in its
    /// channel, and `setup-client` is queued on `sender`. On failure nothing is
    /// registered and `sender` is dropped.
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 新しく割り当てられた接続 ID
    /// * `Err(HandshakeError)` - ハンドシェイク失敗（トランスポートは閉じること）
    pub async fn execute(
        &self,
        request: JoinRequest,
        sender: PusherChannel,
    ) -> Result<ConnectionId, HandshakeError> {
        let name: DisplayName = required(request.name, "name")?;
        let lobby: ChannelName = required(request.lobby, "lobby")?;
        let avatar: Avatar = required(request.avatar, "avatar")?;

        let mut registry = self.registry.lock().await;

        let channel = registry
            .get_channel(&lobby)
            .ok_or_else(|| HandshakeError::ChannelNotFound(lobby.to_string()))?;
        if !channel.accepts(request.password.as_deref()) {
            return Err(HandshakeError::PasswordMismatch(lobby.to_string()));
        }

        let id = ConnectionIdFactory::generate();
        registry.add_member(&lobby, id.clone())?;
        registry.register_connection(Connection::new(
            id.clone(),
            name,
            avatar,
            lobby.clone(),
            sender,
        ));

        if let (Some(connection), Some(channel)) =
            (registry.lookup_connection(&id), registry.get_channel(&lobby))
        {
            let event = ServerEvent::setup_client(connection, channel);
            self.notifier.notify_one(&registry, &id, &event);
            tracing::info!(
                "Connection '{}' ({}) joined channel '{}'",
                id,
                connection.name,
                lobby
            );
        }

        Ok(id)
    }
}

fn required<T>(value: Option<String>, param: &'static str) -> Result<T, HandshakeError>
where
    T: TryFrom<String, Error = ValueObjectError>,
{
    value
        .ok_or(HandshakeError::MissingParameter(param))
        .and_then(|value| T::try_from(value).map_err(|_| HandshakeError::MissingParameter(param)))
}
