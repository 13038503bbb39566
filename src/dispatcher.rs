//! Races the enabled channels and reports the first one that delivers.
//!
//! Each channel runs in its own task under its own timeout. A failure never
//! ends the race on its own: the dispatcher keeps waiting until some channel
//! succeeds or every channel has failed. Once a winner is known the other
//! tasks are detached and allowed to finish; their outcomes are only logged.

use crate::core::{
    ChannelError, ChannelFailure, ChannelKind, DispatchResult, NotificationChannel, Outcome,
};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// The default per-channel timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Holds the available channels and races the enabled subset on demand.
#[derive(Clone, Default)]
pub struct Dispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel, replacing any channel of the same kind.
    pub fn with_channel(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channels.retain(|c| c.kind() != channel.kind());
        self.channels.push(channel);
        self
    }

    fn channel(&self, kind: ChannelKind) -> Option<Arc<dyn NotificationChannel>> {
        self.channels.iter().find(|c| c.kind() == kind).cloned()
    }

    /// Sends through every channel in `enabled` concurrently and resolves to
    /// the first definitive success.
    ///
    /// Failures are reported in the order of `enabled`. Duplicate kinds are
    /// ignored after their first occurrence.
    #[instrument(skip(self), fields(timeout_ms = per_channel_timeout.as_millis() as u64))]
    pub async fn dispatch(
        &self,
        enabled: &[ChannelKind],
        per_channel_timeout: Duration,
    ) -> DispatchResult {
        let mut kinds: Vec<ChannelKind> = Vec::with_capacity(enabled.len());
        for kind in enabled {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }

        if kinds.is_empty() {
            info!("No channels enabled, nothing to send.");
            return DispatchResult::NoChannelsEnabled;
        }

        let decided = Arc::new(AtomicBool::new(false));
        let mut failures: Vec<Option<ChannelError>> = vec![None; kinds.len()];
        let mut pending: FuturesUnordered<_> = kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                let handle = self.spawn_attempt(*kind, per_channel_timeout, decided.clone());
                async move { (index, handle.await) }
            })
            .collect();

        while let Some((index, joined)) = pending.next().await {
            let kind = kinds[index];
            let outcome = joined.unwrap_or_else(|e| {
                Err(ChannelError::NetworkError(format!(
                    "channel task failed: {}",
                    e
                )))
            });

            match outcome {
                Ok(status) => {
                    decided.store(true, Ordering::SeqCst);
                    info!(channel = %kind, %status, "Notification delivered.");
                    for (i, failure) in failures.iter().enumerate() {
                        if let Some(reason) = failure {
                            debug!(channel = %kinds[i], %reason, "Failure superseded by delivery.");
                        }
                    }
                    // Dropping the join handles detaches the remaining tasks.
                    return DispatchResult::Delivered {
                        channel: kind,
                        status,
                    };
                }
                Err(reason) => {
                    warn!(channel = %kind, %reason, "Channel failed, waiting on the rest.");
                    failures[index] = Some(reason);
                }
            }
        }

        let failures: Vec<ChannelFailure> = kinds
            .into_iter()
            .zip(failures)
            .filter_map(|(channel, reason)| reason.map(|reason| ChannelFailure { channel, reason }))
            .collect();
        warn!(count = failures.len(), "All channels failed.");
        DispatchResult::AllFailed(failures)
    }

    /// Runs one channel under its own timeout in a separate task.
    ///
    /// The timeout drops the send future, which drops the in-flight request
    /// with it.
    fn spawn_attempt(
        &self,
        kind: ChannelKind,
        per_channel_timeout: Duration,
        decided: Arc<AtomicBool>,
    ) -> JoinHandle<Outcome> {
        let channel = self.channel(kind);
        tokio::spawn(async move {
            let outcome = match channel {
                Some(channel) => tokio::time::timeout(per_channel_timeout, channel.send())
                    .await
                    .unwrap_or(Err(ChannelError::Timeout)),
                None => Err(ChannelError::ConfigMissing("channel")),
            };
            if decided.load(Ordering::SeqCst) {
                debug!(channel = %kind, ?outcome, "Late outcome discarded.");
            }
            outcome
        })
    }
}
