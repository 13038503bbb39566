//! A client for publishing push notifications to an ntfy topic.

use crate::channels::{classify, endpoint};
use crate::config::NtfyConfig;
use crate::core::{ChannelError, ChannelKind, NotificationChannel, Outcome};
use async_trait::async_trait;
use chrono::Local;
use reqwest::header::CONTENT_TYPE;
use tracing::{info, instrument};

/// Publishes a plain-text message with title, priority and tag headers.
#[derive(Debug, Clone)]
pub struct NtfyChannel {
    client: reqwest::Client,
    base_url: String,
    topic: Option<String>,
    title: String,
    message: Option<String>,
    priority: u8,
    tags: Vec<String>,
}

impl NtfyChannel {
    /// Creates a channel whose defaults come from the `[ntfy]` configuration.
    pub fn from_config(client: reqwest::Client, config: &NtfyConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            topic: config.topic.clone(),
            title: config.title.clone(),
            message: config.message.clone(),
            priority: config.priority,
            tags: config.tags.clone(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the priority, clamped to the 1..=5 range ntfy accepts.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 5);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    fn body(&self) -> String {
        self.message.clone().unwrap_or_else(default_message)
    }
}

/// The message sent when none is configured, stamped with the local time.
pub fn default_message() -> String {
    format!(
        "🚨 Diet Coke requested!  Sent: {}",
        Local::now().format("%m/%d/%y %I:%M:%S %p")
    )
}

#[async_trait]
impl NotificationChannel for NtfyChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Push
    }

    #[instrument(skip(self), fields(channel = "ntfy", topic = ?self.topic))]
    async fn send(&self) -> Outcome {
        let topic = self
            .topic
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ChannelError::ConfigMissing("topic"))?;
        let url = endpoint(&self.base_url, &[topic])?;

        info!("Publishing to ntfy.");
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .header("X-Title", &self.title)
            .header("X-Priority", self.priority.to_string());
        if !self.tags.is_empty() {
            request = request.header("X-Tags", self.tags.join(","));
        }

        classify(self.name(), request.body(self.body()).send().await)
    }
}
