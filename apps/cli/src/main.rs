use std::{io, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config::load_settings, HttpStatusApi, StatusPoller};
use shared::domain::ControlAction;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(about = "Watch and control the playback status service")]
struct Args {
    /// Overrides the configured server url.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Overrides the configured poll interval.
    #[arg(long, global = true)]
    interval_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the status endpoint and print every change until interrupted.
    Watch,
    /// Send one control command and print the resulting state.
    Control {
        /// play, pause, stop, next, previous, or any action the player accepts.
        action: String,
    },
}

/// Known commands go out in the player's exact spelling; anything else is
/// passed through untouched.
fn outgoing_action(raw: &str) -> String {
    match raw.parse::<ControlAction>() {
        Ok(action) => action.as_str().to_string(),
        Err(_) => {
            tracing::warn!(action = %raw, "action is not a known player command");
            raw.to_string()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    if let Some(ms) = args.interval_ms {
        settings.poll_interval_ms = ms;
    }
    let base_url = settings.base_url()?;
    let api = Arc::new(HttpStatusApi::new(base_url));
    let poller = StatusPoller::new(api, TerminalView::new(io::stdout()));

    match args.command {
        Command::Watch => {
            let period = settings.poll_interval()?;
            tracing::info!(server_url = %settings.server_url, "watching player status");
            let task = poller.start(period);
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for ctrl-c")?;
            task.stop().await;
        }
        Command::Control { action } => {
            let action = outgoing_action(&action);
            poller
                .send_control(&action)
                .await
                .with_context(|| format!("control command '{action}' failed"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::outgoing_action;

    #[test]
    fn known_actions_are_sent_in_canonical_spelling() {
        assert_eq!(outgoing_action(" Pause "), "pause");
        assert_eq!(outgoing_action("NEXT"), "next");
    }

    #[test]
    fn unknown_actions_pass_through_verbatim() {
        assert_eq!(outgoing_action("Shuffle"), "Shuffle");
        assert_eq!(outgoing_action(" rewind "), " rewind ");
    }
}
