//! Outbound delivery abstraction.
//!
//! Each joined connection owns an unbounded queue; a writer task drains it onto
//! the socket. Pushing only enqueues, so it never blocks while the registry is
//! locked. Dropping the last sender closes the queue and ends the writer.

use tokio::sync::mpsc;

use super::{entity::Connection, error::MessagePushError};

/// Send half of a connection's outbound queue.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivers an encoded frame to one connection.
pub trait MessagePusher: Send + Sync {
    fn push_to(&self, connection: &Connection, content: &str) -> Result<(), MessagePushError>;
}

/// Which connections receive a fanout event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BroadcastScope {
    /// Every registered connection, regardless of channel.
    #[default]
    ProcessWide,
    /// Only members of the channel that triggered the event.
    Channel,
}
