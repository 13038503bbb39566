//! dietcoke - ask for a Diet Coke over every notification service you have
//!
//! This library races a push notification (ntfy) and an automation webhook
//! (IFTTT) and reports the first one that was delivered.
pub mod app;
pub mod channels;
pub mod cli;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod repl;
pub mod state;
pub mod status;

// Re-export core types for convenience
pub use crate::core::*;
