//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`UnboundedSender`）へのフレーム投入
//!
//! キューの受信側は UI 層（`ui/handler/websocket.rs`）の writer タスクが
//! 保持し、WebSocket へ書き出します。

use crate::domain::{Connection, MessagePushError, MessagePusher};

/// WebSocket を使った MessagePusher 実装
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn push_to(&self, connection: &Connection, content: &str) -> Result<(), MessagePushError> {
        connection
            .sender()
            .send(content.to_string())
            .map_err(|_| MessagePushError::TransportClosed(connection.id.as_str().to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection.id);
        Ok(())
    }
}
