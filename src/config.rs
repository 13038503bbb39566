//! Configuration management for dietcoke
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to layer defaults, an optional TOML file, `DIETCOKE_` environment
//! variables and the command line, in that order.

use crate::cli::Cli;
use crate::dispatcher::DEFAULT_TIMEOUT;
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Which channels are enabled and how long each may take.
    pub dispatch: DispatchConfig,
    /// Configuration for the ntfy push channel.
    pub ntfy: NtfyConfig,
    /// Configuration for the IFTTT webhook channel.
    pub ifttt: IftttConfig,
}

/// Configuration for the dispatcher.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Per-channel timeout in milliseconds.
    pub timeout_ms: u64,
    /// Initial state of the ntfy toggle.
    pub use_ntfy: bool,
    /// Initial state of the IFTTT toggle.
    pub use_ifttt: bool,
}

impl DispatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Configuration for the ntfy push channel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NtfyConfig {
    /// The ntfy server, e.g. `https://ntfy.sh`.
    pub base_url: String,
    /// The topic to publish to. Required when the channel is enabled.
    pub topic: Option<String>,
    /// Notification title, sent as `X-Title`.
    pub title: String,
    /// Message body. When unset a timestamped default is generated per send.
    pub message: Option<String>,
    /// Priority from 1 (min) to 5 (max).
    pub priority: u8,
    /// Emoji tags, sent comma-joined as `X-Tags`.
    pub tags: Vec<String>,
}

/// Configuration for the IFTTT webhook channel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IftttConfig {
    /// The maker webhook server, e.g. `https://maker.ifttt.com`.
    pub base_url: String,
    /// The webhook key. Required when the channel is enabled.
    pub key: Option<String>,
    /// The event name to trigger.
    pub event: String,
    /// Optional JSON payload values.
    #[serde(default)]
    pub value1: Option<String>,
    #[serde(default)]
    pub value2: Option<String>,
    #[serde(default)]
    pub value3: Option<String>,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// The file named by `--config` is optional; a missing file simply
    /// contributes nothing.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        // e.g. DIETCOKE_NTFY__TOPIC=my-topic or DIETCOKE_DISPATCH__TIMEOUT_MS=3000
        figment = figment.merge(env());
        // figment reads `102508` or `007` as a number; text settings keep the raw value.
        for (key, value) in env().iter() {
            if TEXT_KEYS.contains(&key.as_str()) {
                figment = figment.merge(Serialized::default(key.as_str(), value));
            }
        }
        let config: Config = figment.merge(cli.clone()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that are well-typed but unusable.
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.ntfy.priority) {
            bail!(
                "ntfy.priority must be between 1 and 5, got {}",
                self.ntfy.priority
            );
        }
        if self.dispatch.timeout_ms == 0 {
            bail!("dispatch.timeout_ms must be greater than zero");
        }
        for (field, url) in [
            ("ntfy.base_url", &self.ntfy.base_url),
            ("ifttt.base_url", &self.ifttt.base_url),
        ] {
            let parsed = Url::parse(url)
                .map_err(|e| anyhow::anyhow!("{} is not a valid URL ({}): {}", field, url, e))?;
            if parsed.cannot_be_a_base() {
                bail!("{} cannot be used as a base URL: {}", field, url);
            }
        }
        Ok(())
    }
}

/// Settings that are always strings, however much their value looks like a number.
const TEXT_KEYS: &[&str] = &[
    "log_level",
    "ntfy.base_url",
    "ntfy.topic",
    "ntfy.title",
    "ntfy.message",
    "ifttt.base_url",
    "ifttt.key",
    "ifttt.event",
    "ifttt.value1",
    "ifttt.value2",
    "ifttt.value3",
];

fn env() -> Env {
    Env::prefixed("DIETCOKE_").split("__")
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dispatch: DispatchConfig {
                timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
                use_ntfy: true,
                use_ifttt: true,
            },
            ntfy: NtfyConfig {
                base_url: "https://ntfy.sh".to_string(),
                topic: None,
                title: "Diet Coke".to_string(),
                message: None,
                priority: 5,
                tags: vec!["rotating_light".to_string()],
            },
            ifttt: IftttConfig {
                base_url: "https://maker.ifttt.com".to_string(),
                key: None,
                event: "diet_coke".to_string(),
                value1: None,
                value2: None,
                value3: None,
            },
        }
    }
}
