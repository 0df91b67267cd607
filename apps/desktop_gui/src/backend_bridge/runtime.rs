//! Backend worker: owns the tokio runtime, the poller, and the command loop.

use std::{sync::Arc, thread, time::Duration};

use client_core::{HttpStatusApi, StatusPoller};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{report_backend_failure, ChannelView, UiEvent};

pub struct BackendConfig {
    pub base_url: Url,
    pub poll_interval: Duration,
}

pub fn launch(
    config: BackendConfig,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    repaint: egui::Context,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                report_backend_failure(
                    &ui_tx,
                    &repaint,
                    format!("failed to build backend runtime: {err}"),
                );
                return;
            }
        };

        runtime.block_on(async move {
            let api = Arc::new(HttpStatusApi::new(config.base_url));
            let view = ChannelView::new(ui_tx).with_repaint(repaint);
            let poller = StatusPoller::new(api, view);
            let task = poller.start(config.poll_interval);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Control { action } => {
                        let poller = poller.clone();
                        tokio::spawn(async move {
                            let _ = poller.send_control(action.as_str()).await;
                        });
                    }
                    BackendCommand::Refresh => {
                        let poller = poller.clone();
                        tokio::spawn(async move {
                            let _ = poller.refresh_status().await;
                        });
                    }
                    BackendCommand::Shutdown => break,
                }
            }

            task.stop().await;
            tracing::info!("backend worker stopped");
        });
    })
}
