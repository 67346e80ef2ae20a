//! Conversion logic between domain entities and DTOs.

use crate::domain::{Channel, ChannelSummary, ChatMessage, Connection, Presence};
use crate::infrastructure::dto::{
    http::ChannelSummaryDto,
    websocket::{
        ConnectionsDto, ConnectionsPacket, MessageDto, MessagesPacket, PresenceDto, ServerEvent,
        SetupClientPacket,
    },
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Presence> for PresenceDto {
    fn from(presence: Presence) -> Self {
        match presence {
            Presence::Online => Self::Online,
        }
    }
}

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            owner_id: message.owner_id.as_str().to_string(),
            owner_name: message.owner_name.as_str().to_string(),
            owner_avatar: message.owner_avatar.as_str().to_string(),
            text: message.text.clone(),
            hour: message.sent_at.hour,
            minute: message.sent_at.minute,
        }
    }
}

impl From<ChannelSummary> for ChannelSummaryDto {
    fn from(summary: ChannelSummary) -> Self {
        Self {
            name: summary.name.into_string(),
            label: summary.label,
            protected: summary.protected,
            members: summary.members,
            messages: summary.messages,
        }
    }
}

fn messages_dto(channel: &Channel) -> Vec<MessageDto> {
    channel.messages().iter().map(MessageDto::from).collect()
}

fn connections_dto(channel: &Channel) -> ConnectionsDto {
    channel
        .connections()
        .iter()
        .map(|(id, presence)| (id.as_str().to_string(), (*presence).into()))
        .collect()
}

impl ServerEvent {
    /// `setup-client` for a freshly joined connection
    pub fn setup_client(connection: &Connection, channel: &Channel) -> Self {
        Self::SetupClient(SetupClientPacket {
            id: connection.id.as_str().to_string(),
            name: connection.name.as_str().to_string(),
            avatar: connection.avatar.as_str().to_string(),
            channel: channel.name.as_str().to_string(),
            messages: messages_dto(channel),
            connections: connections_dto(channel),
        })
    }

    /// `send-client-message` carrying the channel's full history and membership
    pub fn send_client_message(channel: &Channel) -> Self {
        Self::SendClientMessage(MessagesPacket {
            messages: messages_dto(channel),
            connections: connections_dto(channel),
        })
    }

    /// `update-client-connections` carrying the channel's membership
    pub fn update_client_connections(channel: &Channel) -> Self {
        Self::UpdateClientConnections(ConnectionsPacket {
            connections: connections_dto(channel),
        })
    }
}
