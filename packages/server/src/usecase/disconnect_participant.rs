//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 接続テーブル・メンバーテーブルからの削除と update-client-connections の通知
//!
//! ### なぜこのテストが必要か
//! - 切断後に ID で参照できなくなることを保証する
//! - 参加していない接続の切断が no-op であることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と残りの接続への通知
//! - エッジケース：二重切断、未参加の接続の切断

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ChannelName, ConnectionId, Registry},
    infrastructure::dto::websocket::ServerEvent,
};

use super::notifier::Notifier;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<Mutex<Registry>>,
    notifier: Arc<Notifier>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>, notifier: Arc<Notifier>) -> Self {
        Self { registry, notifier }
    }

    /// 参加者切断を実行
    ///
    /// Removes the connection from both tables, releases its transport handle
    /// and broadcasts the channel's updated membership.
    ///
    /// # Returns
    ///
    /// * `Some(ChannelName)` - 切断した接続が所属していたチャンネル
    /// * `None` - 接続が Registry に存在しなかった（何もしない）
    pub async fn execute(&self, id: &ConnectionId) -> Option<ChannelName> {
        let mut registry = self.registry.lock().await;

        let connection = registry.unregister_connection(id)?;
        let channel_name = connection.channel.clone();
        if let Err(e) = registry.remove_member(&channel_name, id) {
            tracing::warn!("Failed to remove '{}' from membership: {}", id, e);
        }
        // Releases the transport handle.
        drop(connection);

        if let Some(channel) = registry.get_channel(&channel_name) {
            let event = ServerEvent::update_client_connections(channel);
            self.notifier.notify_all(&registry, &channel_name, &event);
        }

        tracing::info!("Connection '{}' left channel '{}'", id, channel_name);

        Some(channel_name)
    }
}
