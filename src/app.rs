//! The main application logic, decoupled from the entry point.

use crate::{
    channels::{IftttChannel, NtfyChannel},
    config::Config,
    core::{ChannelKind, DispatchResult, NotificationChannel},
    dispatcher::Dispatcher,
    state::{Action, AppState},
    status::{summarize, MessageLog, NO_CHANNELS_MESSAGE},
};
use anyhow::Result;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tracing::{debug, info, instrument};

/// The running notifier: toggles, message log and the dispatcher behind them.
pub struct App {
    state: AppState,
    dispatcher: Dispatcher,
    timeout: Duration,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn messages(&self) -> &MessageLog {
        &self.state.messages
    }

    pub fn apply(&mut self, action: Action) {
        self.state.apply(action);
    }

    /// Presses the button: one dispatch across every enabled channel.
    ///
    /// Progress and the final summary are appended to the message log.
    #[instrument(skip(self))]
    pub async fn request(&mut self) -> DispatchResult {
        let enabled = self.state.enabled_channels();
        if enabled.is_empty() {
            self.apply(Action::SetMessage(NO_CHANNELS_MESSAGE.to_string()));
            return DispatchResult::NoChannelsEnabled;
        }

        for kind in &enabled {
            self.apply(Action::SetMessage(format!("Calling {}...", kind.label())));
        }

        let result = self.dispatcher.dispatch(&enabled, self.timeout).await;
        info!(?result, "Dispatch finished.");
        self.apply(Action::SetMessage(summarize(&result)));
        result
    }
}

/// Builder for the main application.
///
/// This pattern allows for a clean separation of concerns between constructing
/// the application's components and running the application. It also provides
/// a convenient way to override components for testing purposes.
pub struct AppBuilder {
    config: Config,
    client: Option<reqwest::Client>,
    channel_overrides: HashMap<ChannelKind, Arc<dyn NotificationChannel>>,
}

impl AppBuilder {
    /// Creates a new `AppBuilder` with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: None,
            channel_overrides: HashMap::new(),
        }
    }

    /// Supplies the HTTP client shared by the built-in channels.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Replaces the built-in channel of the same kind, e.g. with a fake in tests.
    pub fn channel_override(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channel_overrides.insert(channel.kind(), channel);
        self
    }

    /// Builds all application components, returning a ready `App`.
    #[instrument(skip_all)]
    pub fn build(mut self) -> Result<App> {
        let config = self.config;

        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(concat!("dietcoke/", env!("CARGO_PKG_VERSION")))
                .build()?,
        };

        let ntfy = self
            .channel_overrides
            .remove(&ChannelKind::Push)
            .unwrap_or_else(|| {
                Arc::new(NtfyChannel::from_config(client.clone(), &config.ntfy))
                    as Arc<dyn NotificationChannel>
            });
        let ifttt = self
            .channel_overrides
            .remove(&ChannelKind::Webhook)
            .unwrap_or_else(|| {
                Arc::new(IftttChannel::from_config(client, &config.ifttt))
                    as Arc<dyn NotificationChannel>
            });
        debug!(ntfy = ntfy.name(), ifttt = ifttt.name(), "Channels registered");

        let dispatcher = Dispatcher::new().with_channel(ntfy).with_channel(ifttt);

        Ok(App {
            state: AppState::from_config(&config.dispatch),
            dispatcher,
            timeout: config.dispatch.timeout(),
        })
    }
}
