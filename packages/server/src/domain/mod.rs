//! Domain layer: value objects, entities and the in-memory registry.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use entity::{Channel, ChannelSummary, ChatMessage, Connection, Presence};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use message_pusher::{BroadcastScope, MessagePusher, PusherChannel};
pub use registry::Registry;
pub use value_object::{
    Avatar, ChannelName, ChannelPassword, ConnectionId, ConnectionIdFactory, DisplayName,
};
