use client_core::{Indicator, StatusBoard};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ControlAction;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

pub fn indicator_color(indicator: Indicator) -> egui::Color32 {
    match indicator {
        Indicator::Playing => egui::Color32::from_rgb(76, 175, 80),
        Indicator::Paused => egui::Color32::from_rgb(255, 193, 7),
        Indicator::Neutral => egui::Color32::GRAY,
    }
}

pub struct StatusPanelApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    board: StatusBoard,
    notice: Option<String>,
}

impl StatusPanelApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            board: StatusBoard::default(),
            notice: None,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BoardChanged(board) => self.board = board,
                UiEvent::BackendFailed(message) => self.notice = Some(message),
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        self.notice = dispatch_backend_command(&self.cmd_tx, cmd);
    }
}

impl eframe::App for StatusPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Player status");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("●")
                        .size(22.0)
                        .color(indicator_color(self.board.indicator())),
                );
                ui.label(egui::RichText::new(self.board.status_text()).strong());
            });
            ui.horizontal(|ui| {
                ui.label("Song:");
                ui.label(self.board.song_info());
            });
            ui.horizontal(|ui| {
                ui.label("Gesture:");
                ui.label(self.board.current_gesture());
            });

            ui.add_space(12.0);
            let mut pending = None;
            ui.horizontal(|ui| {
                for action in ControlAction::ALL {
                    if ui.button(action.label()).clicked() {
                        pending = Some(BackendCommand::Control { action });
                    }
                }
                if ui.button("Refresh").clicked() {
                    pending = Some(BackendCommand::Refresh);
                }
            });
            if let Some(cmd) = pending {
                self.dispatch(cmd);
            }

            if let Some(notice) = &self.notice {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::RED, notice.as_str());
            }
        });
    }
}

impl Drop for StatusPanelApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}
