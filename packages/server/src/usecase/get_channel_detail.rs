//! UseCase: チャンネル詳細取得

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChannelName, ChannelSummary, Registry, RegistryError};

/// チャンネル詳細取得のユースケース
pub struct GetChannelDetailUseCase {
    registry: Arc<Mutex<Registry>>,
}

impl GetChannelDetailUseCase {
    pub fn new(registry: Arc<Mutex<Registry>>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, name: String) -> Result<ChannelSummary, RegistryError> {
        let channel_name = ChannelName::new(name.clone())
            .map_err(|_| RegistryError::ChannelNotFound(name))?;

        let registry = self.registry.lock().await;
        registry
            .get_channel(&channel_name)
            .map(|channel| channel.summary())
            .ok_or_else(|| RegistryError::ChannelNotFound(channel_name.into_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::create_test_registry;

    #[tokio::test]
    async fn test_get_channel_detail_found() {
        // テスト項目: 存在するチャンネルの概要が返される
        // given (前提条件):
        let usecase = GetChannelDetailUseCase::new(create_test_registry());

        // when (操作):
        let result = usecase.execute("staff".to_string()).await;

        // then (期待する結果):
        let summary = result.unwrap();
        assert_eq!(summary.label, "Staff room");
        assert!(summary.protected);
        assert_eq!(summary.messages, 0);
    }

    #[tokio::test]
    async fn test_get_channel_detail_not_found() {
        // テスト項目: 存在しないチャンネルは ChannelNotFound になる
        // given (前提条件):
        let usecase = GetChannelDetailUseCase::new(create_test_registry());

        // when (操作):
        let result = usecase.execute("nowhere".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::ChannelNotFound("nowhere".to_string()))
        );
    }
}
