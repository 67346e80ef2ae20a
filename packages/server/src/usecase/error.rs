//! UseCase error types.

use thiserror::Error;

use crate::domain::RegistryError;

/// Reasons a handshake is rejected; the transport is closed on any of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    #[error("Missing or empty handshake parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    #[error("Wrong or missing password for channel '{0}'")]
    PasswordMismatch(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Chat message errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
