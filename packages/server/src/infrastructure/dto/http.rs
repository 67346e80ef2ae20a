//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Channel overview returned by `/api/channels`
///
/// The channel password is never exposed; only whether one is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSummaryDto {
    pub name: String,
    pub label: String,
    pub protected: bool,
    pub members: usize,
    pub messages: usize,
}
