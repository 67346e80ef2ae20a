//! Hiroba lobby relay server library.
//!
//! Clients join a named channel over WebSocket and exchange short text
//! messages. All state lives in an in-memory [`domain::Registry`].

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
