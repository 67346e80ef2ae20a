//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetChannelDetailUseCase,
    GetChannelsUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetChannelsUseCase（チャンネル一覧取得のユースケース）
    pub get_channels_usecase: Arc<GetChannelsUseCase>,
    /// GetChannelDetailUseCase（チャンネル詳細取得のユースケース）
    pub get_channel_detail_usecase: Arc<GetChannelDetailUseCase>,
}
