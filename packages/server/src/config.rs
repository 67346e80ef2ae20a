//! Static channel configuration.
//!
//! Channels are declared on the command line as `NAME` or `NAME:PASSWORD`.
//! The `global` channel is implicit and cannot be redeclared.

use std::{collections::HashSet, str::FromStr};

use thiserror::Error;

use crate::domain::{Channel, ChannelName, ChannelPassword};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Channel declaration '{0}' has an empty name")]
    EmptyChannelName(String),

    #[error("Channel '{0}' is declared more than once")]
    DuplicateChannel(String),

    #[error("Channel 'global' is built in and cannot be redeclared")]
    ReservedChannel,
}

/// One `--channel` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub name: ChannelName,
    pub password: Option<ChannelPassword>,
}

impl FromStr for ChannelConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, password) = match s.split_once(':') {
            Some((name, password)) => (name, Some(password)),
            None => (s, None),
        };

        let name = ChannelName::try_from(name.trim())
            .map_err(|_| ConfigError::EmptyChannelName(s.to_string()))?;
        // An empty secret means "no password".
        let password = password.and_then(|p| ChannelPassword::try_from(p).ok());

        Ok(Self { name, password })
    }
}

impl From<ChannelConfig> for Channel {
    fn from(config: ChannelConfig) -> Self {
        let label = config.name.to_string();
        let channel = Channel::new(config.name, label);
        match config.password {
            Some(password) => channel.with_password(password),
            None => channel,
        }
    }
}

/// Validate declarations and build the channel set, `global` included.
pub fn build_channels(configs: Vec<ChannelConfig>) -> Result<Vec<Channel>, ConfigError> {
    let mut seen = HashSet::new();
    let mut channels = vec![Channel::global()];

    for config in configs {
        if config.name.as_str() == ChannelName::GLOBAL {
            return Err(ConfigError::ReservedChannel);
        }
        if !seen.insert(config.name.clone()) {
            return Err(ConfigError::DuplicateChannel(config.name.into_string()));
        }
        channels.push(config.into());
    }

    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_without_password() {
        // テスト項目: パスワードなしのチャンネル宣言を解析できる
        let config: ChannelConfig = "random".parse().unwrap();
        assert_eq!(config.name.as_str(), "random");
        assert!(config.password.is_none());
    }

    #[test]
    fn test_parse_channel_with_password() {
        // テスト項目: NAME:PASSWORD 形式を解析でき、パスワード中の ':' は保持される
        // given (前提条件):
        let raw = "staff:se:cret";

        // when (操作):
        let config: ChannelConfig = raw.parse().unwrap();

        // then (期待する結果):
        assert_eq!(config.name.as_str(), "staff");
        assert_eq!(config.password.unwrap().as_str(), "se:cret");
    }

    #[test]
    fn test_parse_empty_password_means_unprotected() {
        // テスト項目: 空のパスワードはパスワードなしとして扱われる
        let config: ChannelConfig = "staff:".parse().unwrap();
        assert!(config.password.is_none());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        // テスト項目: 名前が空の宣言はエラーになる
        let result = ":secret".parse::<ChannelConfig>();
        assert_eq!(
            result,
            Err(ConfigError::EmptyChannelName(":secret".to_string()))
        );
    }

    #[test]
    fn test_build_channels_includes_global() {
        // テスト項目: 宣言が空でも global が含まれ、宣言したチャンネルが追加される
        // given (前提条件):
        let configs = vec!["staff:secret".parse().unwrap()];

        // when (操作):
        let channels = build_channels(configs).unwrap();

        // then (期待する結果):
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name.as_str(), "global");
        assert!(!channels[0].is_protected());
        assert_eq!(channels[1].label, "staff");
        assert!(channels[1].accepts(Some("secret")));
    }

    #[test]
    fn test_build_channels_rejects_duplicates_and_global() {
        // テスト項目: 重複宣言と global の再宣言はエラーになる
        // given (前提条件):
        let duplicate = vec!["a".parse().unwrap(), "a:x".parse().unwrap()];
        let reserved = vec!["global:x".parse().unwrap()];

        // when (操作) / then (期待する結果):
        assert_eq!(
            build_channels(duplicate).map(|c| c.len()),
            Err(ConfigError::DuplicateChannel("a".to_string()))
        );
        assert_eq!(
            build_channels(reserved).map(|c| c.len()),
            Err(ConfigError::ReservedChannel)
        );
    }
}
