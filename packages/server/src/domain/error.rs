//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// A required string was empty
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Registry lookup failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),
}

/// Delivery failures on a single connection's transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// The outbound queue is closed (the socket writer has gone away)
    #[error("Failed to push message to '{0}': transport closed")]
    TransportClosed(String),
}
