//! UseCase layer: the relay's connection lifecycle and fanout.
//!
//! All use cases share one `Arc<Mutex<Registry>>`. Each event (join, chat
//! message, close) does its registry reads, mutations and fanout enqueues
//! inside a single critical section, so events are applied one at a time.

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_channel_detail;
mod get_channels;
mod notifier;
mod send_message;

pub use connect_participant::{ConnectParticipantUseCase, JoinRequest};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{HandshakeError, SendMessageError};
pub use get_channel_detail::GetChannelDetailUseCase;
pub use get_channels::GetChannelsUseCase;
pub use notifier::Notifier;
pub use send_message::SendMessageUseCase;
