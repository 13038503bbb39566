//! dietcoke - one button, two notification services
//!
//! Sends once and exits, or runs an interactive session with `--interactive`.

use anyhow::Result;
use clap::Parser;
use dietcoke::{app::App, cli::Cli, config::Config, repl};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Status lines go to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logging for this specific error
        init_logging("info");
        error!("Failed to load configuration: {}", err);
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    init_logging(&config.log_level);

    // Log the loaded configuration settings for visibility
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Per-Channel Timeout: {}ms", config.dispatch.timeout_ms);
    info!(
        "ntfy: {} ({}, topic {})",
        if config.dispatch.use_ntfy { "Enabled" } else { "Disabled" },
        config.ntfy.base_url,
        config.ntfy.topic.as_deref().unwrap_or("<unset>")
    );
    info!(
        "IFTTT: {} ({}, event {}, key {})",
        if config.dispatch.use_ifttt { "Enabled" } else { "Disabled" },
        config.ifttt.base_url,
        config.ifttt.event,
        if config.ifttt.key.is_some() { "set" } else { "<unset>" }
    );
    info!("-------------------------------------------------------");

    let mut app = App::builder(config).build()?;

    if cli.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        repl::run(&mut app, stdin, tokio::io::stdout()).await?;
        return Ok(());
    }

    let result = app.request().await;
    for line in app.messages().entries() {
        println!("{}", line);
    }

    if !result.is_delivered() {
        std::process::exit(1);
    }
    Ok(())
}
