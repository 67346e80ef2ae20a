//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RegistryError, infrastructure::dto::http::ChannelSummaryDto, ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of channels
pub async fn get_channels(State(state): State<Arc<AppState>>) -> Json<Vec<ChannelSummaryDto>> {
    let channels = state.get_channels_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(channels.into_iter().map(ChannelSummaryDto::from).collect())
}

/// Get channel detail by name
pub async fn get_channel_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ChannelSummaryDto>, StatusCode> {
    match state.get_channel_detail_usecase.execute(name).await {
        Ok(summary) => Ok(Json(summary.into())),
        Err(RegistryError::ChannelNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(RegistryError::ConnectionNotFound(_)) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
