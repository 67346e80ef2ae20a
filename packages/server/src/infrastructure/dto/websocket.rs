//! WebSocket envelope DTOs.
//!
//! Server → client frames are `{"type": ..., "packet": ...}`;
//! client → server frames are `{"type": ..., "content": ...}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Presence marker as it appears on the wire (`"online"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceDto {
    Online,
}

/// Channel membership: connection id → presence
pub type ConnectionsDto = BTreeMap<String, PresenceDto>;

/// One entry of a channel's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub owner_id: String,
    pub owner_name: String,
    pub owner_avatar: String,
    pub text: String,
    pub hour: u32,
    pub minute: u32,
}

/// Payload of `setup-client`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupClientPacket {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub channel: String,
    pub messages: Vec<MessageDto>,
    pub connections: ConnectionsDto,
}

/// Payload of `send-client-message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesPacket {
    pub messages: Vec<MessageDto>,
    pub connections: ConnectionsDto,
}

/// Payload of `update-client-connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionsPacket {
    pub connections: ConnectionsDto,
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "packet", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent once to a connection right after it joins
    SetupClient(SetupClientPacket),
    /// Sent on every accepted chat message
    SendClientMessage(MessagesPacket),
    /// Sent on every connection close
    UpdateClientConnections(ConnectionsPacket),
}

impl ServerEvent {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SetupClient(_) => "setup-client",
            Self::SendClientMessage(_) => "send-client-message",
            Self::UpdateClientConnections(_) => "update-client-connections",
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of `new-client-message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClientMessageContent {
    pub message: String,
}

/// Client → server events
///
/// Unrecognized `type` values fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum ClientEvent {
    NewClientMessage(NewClientMessageContent),
}

/// Reasons an inbound frame is dropped
#[derive(Debug, Error)]
pub enum FrameDecodeError {
    #[error("frame is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("invalid envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),
}

impl ClientEvent {
    pub fn decode_text(text: &str) -> Result<Self, FrameDecodeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, FrameDecodeError> {
        Self::decode_text(std::str::from_utf8(bytes)?)
    }
}
