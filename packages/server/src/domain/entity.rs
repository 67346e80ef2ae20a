//! Entities: channels, connections and chat messages.

use std::collections::BTreeMap;

use hiroba_shared::time::TimeOfDay;

use super::{
    message_pusher::PusherChannel,
    value_object::{Avatar, ChannelName, ChannelPassword, ConnectionId, DisplayName},
};

/// Presence marker stored in a channel's membership table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Online,
}

/// A chat message as stored in channel history.
///
/// Owner fields are a snapshot of the sender's identity at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub owner_id: ConnectionId,
    pub owner_name: DisplayName,
    pub owner_avatar: Avatar,
    pub text: String,
    pub sent_at: TimeOfDay,
}

impl ChatMessage {
    pub fn new(owner: &Connection, text: String, sent_at: TimeOfDay) -> Self {
        Self {
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            owner_avatar: owner.avatar.clone(),
            text,
            sent_at,
        }
    }
}

/// A named group of connections sharing history and membership.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: ChannelName,
    /// Display label, e.g. "Chat global"
    pub label: String,
    password: Option<ChannelPassword>,
    connections: BTreeMap<ConnectionId, Presence>,
    messages: Vec<ChatMessage>,
}

impl Channel {
    pub fn new(name: ChannelName, label: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
            password: None,
            connections: BTreeMap::new(),
            messages: Vec::new(),
        }
    }

    /// The always-present `global` channel.
    pub fn global() -> Self {
        Self::new(ChannelName::global(), "Chat global")
    }

    pub fn with_password(mut self, password: ChannelPassword) -> Self {
        self.password = Some(password);
        self
    }

    pub fn is_protected(&self) -> bool {
        self.password.is_some()
    }

    /// Whether `supplied` grants access to this channel.
    ///
    /// Unprotected channels accept anything, including no password.
    pub fn accepts(&self, supplied: Option<&str>) -> bool {
        match &self.password {
            None => true,
            Some(expected) => supplied == Some(expected.as_str()),
        }
    }

    pub fn connections(&self) -> &BTreeMap<ConnectionId, Presence> {
        &self.connections
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn has_member(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn summary(&self) -> ChannelSummary {
        ChannelSummary {
            name: self.name.clone(),
            label: self.label.clone(),
            protected: self.is_protected(),
            members: self.connections.len(),
            messages: self.messages.len(),
        }
    }

    pub(super) fn insert_member(&mut self, id: ConnectionId) {
        self.connections.insert(id, Presence::Online);
    }

    pub(super) fn remove_member(&mut self, id: &ConnectionId) {
        self.connections.remove(id);
    }

    pub(super) fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

/// Read-only overview of a channel, without its secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub name: ChannelName,
    pub label: String,
    pub protected: bool,
    pub members: usize,
    pub messages: usize,
}

/// One client's live session, bound to exactly one channel.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: DisplayName,
    pub avatar: Avatar,
    pub channel: ChannelName,
    sender: PusherChannel,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        name: DisplayName,
        avatar: Avatar,
        channel: ChannelName,
        sender: PusherChannel,
    ) -> Self {
        Self {
            id,
            name,
            avatar,
            channel,
            sender,
        }
    }

    /// Transport handle; owned by this entry and released when it is dropped.
    pub fn sender(&self) -> &PusherChannel {
        &self.sender
    }
}
