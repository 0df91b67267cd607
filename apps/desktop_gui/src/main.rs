mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::config::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{
    commands::BackendCommand,
    runtime::{launch, BackendConfig},
};
use controller::events::UiEvent;
use ui::StatusPanelApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
    /// Overrides the configured poll interval.
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    if let Some(ms) = args.interval_ms {
        settings.poll_interval_ms = ms;
    }
    let config = BackendConfig {
        base_url: settings.base_url()?,
        poll_interval: settings.poll_interval()?,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Player Status")
            .with_inner_size([420.0, 220.0])
            .with_min_inner_size([360.0, 200.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Player Status",
        options,
        Box::new(move |cc| {
            let _worker = launch(config, cmd_rx, ui_tx, cc.egui_ctx.clone());
            Ok(Box::new(StatusPanelApp::new(cmd_tx, ui_rx)))
        }),
    )
    .map_err(|err| anyhow!("status panel exited with error: {err}"))
}
