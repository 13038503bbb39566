//! Toggle and message state, updated only through [`AppState::apply`].

use crate::config::DispatchConfig;
use crate::core::ChannelKind;
use crate::status::MessageLog;

/// Everything a front end needs to render the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub use_ntfy: bool,
    pub use_ifttt: bool,
    pub messages: MessageLog,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Set the ntfy toggle, or flip it when `None`.
    ToggleNtfy(Option<bool>),
    /// Set the IFTTT toggle, or flip it when `None`.
    ToggleIfttt(Option<bool>),
    /// Append a status line. An empty string clears the log instead.
    SetMessage(String),
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            use_ntfy: true,
            use_ifttt: true,
            messages: MessageLog::new(),
        }
    }
}

impl AppState {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            use_ntfy: config.use_ntfy,
            use_ifttt: config.use_ifttt,
            messages: MessageLog::new(),
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleNtfy(value) => self.use_ntfy = value.unwrap_or(!self.use_ntfy),
            Action::ToggleIfttt(value) => self.use_ifttt = value.unwrap_or(!self.use_ifttt),
            Action::SetMessage(message) if message.is_empty() => self.messages.clear(),
            Action::SetMessage(message) => self.messages.push(message),
        }
    }

    /// The enabled channels in enablement order: ntfy first, then IFTTT.
    pub fn enabled_channels(&self) -> Vec<ChannelKind> {
        [
            (self.use_ntfy, ChannelKind::Push),
            (self.use_ifttt, ChannelKind::Webhook),
        ]
        .into_iter()
        .filter_map(|(enabled, kind)| enabled.then_some(kind))
        .collect()
    }
}
