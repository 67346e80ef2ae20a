//! UseCase: チャンネル一覧取得

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChannelSummary, Registry};

/// チャンネル一覧取得のユースケース
pub struct GetChannelsUseCase {
    registry: Arc<Mutex<Registry>>,
}

impl GetChannelsUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>) -> Self {
        Self { registry }
    }

    /// Overview of every channel, sorted by name.
    pub async fn execute(&self) -> Vec<ChannelSummary> {
        let registry = self.registry.lock().await;
        let mut summaries: Vec<ChannelSummary> =
            registry.channels().map(|channel| channel.summary()).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}
