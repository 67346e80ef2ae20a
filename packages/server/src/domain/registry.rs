//! In-memory registry of channels and live connections.
//!
//! The registry is a plain data structure: it performs no I/O and no
//! validation. Callers serialize access (see `usecase`), so nothing here is
//! synchronized.

use std::collections::HashMap;

use super::{
    entity::{Channel, ChatMessage, Connection},
    error::RegistryError,
    value_object::{ChannelName, ConnectionId},
};

#[derive(Debug)]
pub struct Registry {
    channels: HashMap<ChannelName, Channel>,
    connections: HashMap<ConnectionId, Connection>,
}

impl Registry {
    /// Create a registry from the statically configured channels.
    ///
    /// The `global` channel is added when not configured. A caller-supplied
    /// `global` (tests, or an embedder with its own label) is kept as is.
    pub fn new(channels: impl IntoIterator<Item = Channel>) -> Self {
        let mut channels: HashMap<ChannelName, Channel> = channels
            .into_iter()
            .map(|channel| (channel.name.clone(), channel))
            .collect();
        channels
            .entry(ChannelName::global())
            .or_insert_with(Channel::global);

        Self {
            channels,
            connections: HashMap::new(),
        }
    }

    /// Insert a connection into the global table, replacing any entry with the same id.
    pub fn register_connection(&mut self, connection: Connection) {
        self.connections.insert(connection.id.clone(), connection);
    }

    /// Remove a connection from the global table.
    ///
    /// Removing an absent id is a no-op and returns `None`. The returned entry
    /// still owns the transport handle; dropping it releases the handle.
    pub fn unregister_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn lookup_connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn add_member(
        &mut self,
        channel_name: &ChannelName,
        id: ConnectionId,
    ) -> Result<(), RegistryError> {
        self.channel_mut(channel_name)?.insert_member(id);
        Ok(())
    }

    pub fn remove_member(
        &mut self,
        channel_name: &ChannelName,
        id: &ConnectionId,
    ) -> Result<(), RegistryError> {
        self.channel_mut(channel_name)?.remove_member(id);
        Ok(())
    }

    /// Append a message and return the channel's history so far.
    pub fn append_message(
        &mut self,
        channel_name: &ChannelName,
        message: ChatMessage,
    ) -> Result<&[ChatMessage], RegistryError> {
        let channel = self.channel_mut(channel_name)?;
        channel.push_message(message);
        Ok(channel.messages())
    }

    pub fn get_channel(&self, name: &ChannelName) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn channel_mut(&mut self, name: &ChannelName) -> Result<&mut Channel, RegistryError> {
        self.channels
            .get_mut(name)
            .ok_or_else(|| RegistryError::ChannelNotFound(name.as_str().to_string()))
    }
}
