//! Infrastructure layer: wire formats and transport-facing implementations.

pub mod dto;
pub mod message_pusher;
