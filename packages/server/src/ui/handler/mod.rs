//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{get_channel_detail, get_channels, health_check};
pub use websocket::websocket_handler;
