//! The user-facing message log and the text it shows for each dispatch.

use crate::core::DispatchResult;
use std::collections::VecDeque;

/// How many status lines the log keeps.
pub const MESSAGE_LOG_CAPACITY: usize = 4;

/// Shown when a dispatch is requested with every channel switched off.
pub const NO_CHANNELS_MESSAGE: &str = "Enable at least one service (ntfy or IFTTT) to send.";

/// A bounded, ordered list of status lines. The oldest line is evicted first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    entries: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line, evicting the oldest once the log is full.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == MESSAGE_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The one-line summary of a dispatch.
pub fn summarize(result: &DispatchResult) -> String {
    match result {
        DispatchResult::Delivered { channel, status } => {
            format!("Request sent via {} ({})", channel, status)
        }
        DispatchResult::AllFailed(failures) => {
            let reasons: Vec<String> = failures
                .iter()
                .map(|f| format!("{}: {}", f.channel, f.reason))
                .collect();
            format!("All services failed: {}", reasons.join(", "))
        }
        DispatchResult::NoChannelsEnabled => NO_CHANNELS_MESSAGE.to_string(),
    }
}
