//! A client for triggering IFTTT maker webhooks.

use crate::channels::{classify, endpoint};
use crate::config::IftttConfig;
use crate::core::{ChannelError, ChannelKind, NotificationChannel, Outcome};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};

/// The optional JSON body of a webhook trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value3: Option<String>,
}

impl WebhookPayload {
    fn is_empty(&self) -> bool {
        self.value1.is_none() && self.value2.is_none() && self.value3.is_none()
    }
}

/// Triggers `{base_url}/trigger/{event}/with/key/{key}`.
#[derive(Clone)]
pub struct IftttChannel {
    client: reqwest::Client,
    base_url: String,
    event: String,
    key: Option<String>,
    payload: Option<WebhookPayload>,
}

// The key is a credential; keep it out of debug output.
impl std::fmt::Debug for IftttChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IftttChannel")
            .field("base_url", &self.base_url)
            .field("event", &self.event)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl IftttChannel {
    /// Creates a channel whose defaults come from the `[ifttt]` configuration.
    pub fn from_config(client: reqwest::Client, config: &IftttConfig) -> Self {
        let payload = WebhookPayload {
            value1: config.value1.clone(),
            value2: config.value2.clone(),
            value3: config.value3.clone(),
        };
        Self {
            client,
            base_url: config.base_url.clone(),
            event: config.event.clone(),
            key: config.key.clone(),
            payload: (!payload.is_empty()).then_some(payload),
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the JSON body; an all-empty payload sends no body at all.
    pub fn with_payload(mut self, payload: WebhookPayload) -> Self {
        self.payload = (!payload.is_empty()).then_some(payload);
        self
    }
}

#[async_trait]
impl NotificationChannel for IftttChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Webhook
    }

    #[instrument(skip(self), fields(channel = "ifttt", event = %self.event))]
    async fn send(&self) -> Outcome {
        let key = self
            .key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ChannelError::ConfigMissing("key"))?;
        if self.event.is_empty() {
            return Err(ChannelError::ConfigMissing("event"));
        }
        let url = endpoint(&self.base_url, &["trigger", &self.event, "with", "key", key])?;

        info!("Triggering IFTTT webhook.");
        let mut request = self.client.post(url);
        if let Some(payload) = &self.payload {
            request = request.json(payload);
        }

        classify(self.name(), request.send().await)
    }
}
