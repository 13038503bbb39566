//! Core domain types and service traits for dietcoke
//!
//! This module defines the delivery channel contract and the values that flow
//! between the channels, the dispatcher, and the presentation layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The delivery mechanisms the dispatcher knows how to race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Pub/sub push notification (ntfy).
    Push,
    /// Automation webhook trigger (IFTTT).
    Webhook,
}

impl ChannelKind {
    /// The short name used in logs and status messages.
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Push => "ntfy",
            ChannelKind::Webhook => "ifttt",
        }
    }

    /// The human-readable label used in the message log.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Push => "Ntfy",
            ChannelKind::Webhook => "IFTTT",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Details of a response that counted as a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// The HTTP status code returned by the service.
    pub status: u16,
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)
    }
}

/// Why a single channel attempt did not deliver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    HttpError(u16),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("missing required configuration: {0}")]
    ConfigMissing(&'static str),
}

/// The result of one channel attempt.
pub type Outcome = Result<StatusInfo, ChannelError>;

/// A failed channel together with its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFailure {
    pub channel: ChannelKind,
    pub reason: ChannelError,
}

/// The aggregate result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// The first channel that responded with a success status.
    Delivered {
        channel: ChannelKind,
        status: StatusInfo,
    },
    /// Every enabled channel failed, listed in enablement order.
    AllFailed(Vec<ChannelFailure>),
    /// The enabled set was empty; nothing was sent.
    NoChannelsEnabled,
}

impl DispatchResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchResult::Delivered { .. })
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// An outbound delivery mechanism.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Which kind of channel this is. Used to select it from the enabled set.
    fn kind(&self) -> ChannelKind;

    /// A unique, descriptive name for the channel, used for logging.
    fn name(&self) -> &str {
        self.kind().name()
    }

    /// Sends one notification.
    ///
    /// # Returns
    /// * `Ok(StatusInfo)` only when the transport completed with a 2xx status
    /// * `Err(ChannelError)` for missing configuration, transport failures and
    ///   non-success statuses
    async fn send(&self) -> Outcome;
}
