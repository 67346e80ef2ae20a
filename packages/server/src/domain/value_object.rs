//! Value objects.
//!
//! Identity fields supplied by clients are plain strings on the wire; the only
//! rule enforced here is that required fields are non-empty.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

macro_rules! non_empty_string {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                if value.is_empty() {
                    return Err(ValueObjectError::Empty($label));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValueObjectError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

non_empty_string!(
    /// Opaque connection identifier, unique for the lifetime of the process.
    ConnectionId,
    "connection id"
);

non_empty_string!(
    /// Channel lookup key (the `lobby` handshake parameter).
    ChannelName,
    "channel name"
);

non_empty_string!(
    /// Display name chosen by the client at join time.
    DisplayName,
    "name"
);

non_empty_string!(
    /// Opaque avatar reference chosen by the client at join time.
    Avatar,
    "avatar"
);

non_empty_string!(
    /// Shared channel secret.
    ChannelPassword,
    "password"
);

impl ChannelName {
    /// Name of the channel that always exists.
    pub const GLOBAL: &'static str = "global";

    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }
}

/// Generates fresh connection ids (UUID v4).
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}
