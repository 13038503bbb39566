//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the TOML file and environment variables. Anything
//! given here wins over the other sources.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Request a Diet Coke over every enabled notification service.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run an interactive session instead of sending once.
    #[arg(short, long)]
    pub interactive: bool,

    /// Logging level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Per-channel timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Disable the ntfy push channel.
    #[arg(long)]
    pub no_ntfy: bool,

    /// Disable the IFTTT webhook channel.
    #[arg(long)]
    pub no_ifttt: bool,

    /// ntfy topic to publish to.
    #[arg(long, value_name = "TOPIC")]
    pub topic: Option<String>,

    /// ntfy notification title.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// ntfy message body.
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,

    /// ntfy priority (1-5).
    #[arg(long, value_name = "N")]
    pub priority: Option<u8>,

    /// ntfy tag; repeat for several.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// IFTTT webhook key.
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// IFTTT event name.
    #[arg(long, value_name = "EVENT")]
    pub event: Option<String>,

    /// IFTTT payload value1.
    #[arg(long, value_name = "VALUE")]
    pub value1: Option<String>,

    /// IFTTT payload value2.
    #[arg(long, value_name = "VALUE")]
    pub value2: Option<String>,

    /// IFTTT payload value3.
    #[arg(long, value_name = "VALUE")]
    pub value3: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut dispatch = Dict::new();
        if let Some(timeout) = self.timeout_ms {
            dispatch.insert("timeout_ms".into(), Value::from(timeout));
        }
        // The flags only ever disable; leaving them off defers to the other sources.
        if self.no_ntfy {
            dispatch.insert("use_ntfy".into(), Value::from(false));
        }
        if self.no_ifttt {
            dispatch.insert("use_ifttt".into(), Value::from(false));
        }

        let mut ntfy = Dict::new();
        insert_opt(&mut ntfy, "topic", &self.topic);
        insert_opt(&mut ntfy, "title", &self.title);
        insert_opt(&mut ntfy, "message", &self.message);
        if let Some(priority) = self.priority {
            ntfy.insert("priority".into(), Value::from(priority));
        }
        if !self.tags.is_empty() {
            ntfy.insert("tags".into(), Value::from(self.tags.clone()));
        }

        let mut ifttt = Dict::new();
        insert_opt(&mut ifttt, "key", &self.key);
        insert_opt(&mut ifttt, "event", &self.event);
        insert_opt(&mut ifttt, "value1", &self.value1);
        insert_opt(&mut ifttt, "value2", &self.value2);
        insert_opt(&mut ifttt, "value3", &self.value3);

        for (section, values) in [("dispatch", dispatch), ("ntfy", ntfy), ("ifttt", ifttt)] {
            if !values.is_empty() {
                dict.insert(section.into(), Value::from(values));
            }
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}

fn insert_opt(dict: &mut Dict, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        dict.insert(key.into(), Value::from(value.clone()));
    }
}
