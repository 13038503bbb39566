//! Line-oriented interactive front end: the button, the toggles, and the log.

use crate::app::App;
use crate::state::Action;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const HELP: &str = "commands: send | ntfy [on|off] | ifttt [on|off] | clear | status | quit";

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Send,
    Toggle(Action),
    Clear,
    Status,
    Help,
    Quit,
}

fn parse(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let switch = match words.next() {
        None => None,
        Some("on") => Some(true),
        Some("off") => Some(false),
        Some(_) => return Some(Command::Help),
    };
    Some(match command {
        "send" | "s" => Command::Send,
        "ntfy" => Command::Toggle(Action::ToggleNtfy(switch)),
        "ifttt" => Command::Toggle(Action::ToggleIfttt(switch)),
        "clear" => Command::Clear,
        "status" => Command::Status,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Help,
    })
}

async fn render<W: AsyncWrite + Unpin>(app: &App, out: &mut W) -> Result<()> {
    let state = app.state();
    let mut text = format!(
        "[ntfy: {}] [ifttt: {}]\n",
        on_off(state.use_ntfy),
        on_off(state.use_ifttt)
    );
    for line in state.messages.entries() {
        text.push_str("  ");
        text.push_str(line);
        text.push('\n');
    }
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Reads commands until `quit` or end of input.
pub async fn run<R, W>(app: &mut App, input: R, mut out: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("dietcoke ({})\n", HELP).as_bytes()).await?;
    render(app, &mut out).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let Some(command) = parse(&line) else {
            continue;
        };
        debug!(?command, "Interactive command");
        match command {
            Command::Send => {
                app.request().await;
            }
            Command::Toggle(action) => app.apply(action),
            Command::Clear => app.apply(Action::SetMessage(String::new())),
            Command::Status => {}
            Command::Help => {
                out.write_all(format!("{}\n", HELP).as_bytes()).await?;
                continue;
            }
            Command::Quit => break,
        }
        render(app, &mut out).await?;
    }
    Ok(())
}
