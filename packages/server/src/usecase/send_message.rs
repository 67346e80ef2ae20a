//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加と send-client-message のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全接続に同一のペイロードが届くことを保証する
//! - 履歴が追加順に並び、送信時点の送信者情報を保持することを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：同一チャンネルの複数接続へのブロードキャスト
//! - 仕様どおりの挙動：他チャンネルの接続にも届く（ProcessWide）
//! - 異常系：既に切断された接続からの送信

use std::sync::Arc;

use hiroba_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatMessage, ConnectionId, Registry, RegistryError},
    infrastructure::dto::websocket::ServerEvent,
};

use super::{error::SendMessageError, notifier::Notifier};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    registry: Arc<Mutex<Registry>>,
    notifier: Arc<Notifier>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<Mutex<Registry>>,
        notifier: Arc<Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            notifier,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// Appends `text` to the sender's channel with the sender's identity
    /// snapshot and the current time of day, then broadcasts the channel's
    /// full history and membership.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 追加後の履歴の件数
    /// * `Err(SendMessageError)` - 送信者が既に Registry に存在しない
    pub async fn execute(
        &self,
        sender_id: &ConnectionId,
        text: String,
    ) -> Result<usize, SendMessageError> {
        let mut registry = self.registry.lock().await;

        let sender = registry
            .lookup_connection(sender_id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(sender_id.to_string()))?;
        let channel_name = sender.channel.clone();
        let message = ChatMessage::new(sender, text, self.clock.time_of_day());

        let history_len = registry.append_message(&channel_name, message)?.len();

        let channel = registry
            .get_channel(&channel_name)
            .ok_or_else(|| RegistryError::ChannelNotFound(channel_name.to_string()))?;
        let event = ServerEvent::send_client_message(channel);
        let delivered = self.notifier.notify_all(&registry, &channel_name, &event);

        tracing::info!(
            "Message from '{}' appended to '{}' (#{}), delivered to {} connection(s)",
            sender_id,
            channel_name,
            history_len,
            delivered
        );

        Ok(history_len)
    }
}
