//! Backend-to-UI events and the view that produces them.

use client_core::{Indicator, StatusBoard, StatusView};
use crossbeam_channel::{Sender, TrySendError};

pub enum UiEvent {
    BoardChanged(StatusBoard),
    /// The backend could not start; nothing will refresh the board.
    BackendFailed(String),
}

pub fn report_backend_failure(
    ui_tx: &Sender<UiEvent>,
    repaint: &egui::Context,
    message: String,
) {
    tracing::error!("{message}");
    if ui_tx.try_send(UiEvent::BackendFailed(message)).is_ok() {
        repaint.request_repaint();
    }
}

/// `StatusView` living on the backend side: it keeps its own board and ships
/// a copy to the UI thread after every render that changed it.
pub struct ChannelView {
    board: StatusBoard,
    sent: Option<StatusBoard>,
    ui_tx: Sender<UiEvent>,
    repaint: Option<egui::Context>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self {
            board: StatusBoard::default(),
            sent: None,
            ui_tx,
            repaint: None,
        }
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }
}

impl StatusView for ChannelView {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.board.set_indicator(indicator);
    }

    fn set_status_text(&mut self, text: &str) {
        self.board.set_status_text(text);
    }

    fn set_song(&mut self, song: &str) {
        self.board.set_song(song);
    }

    fn set_gesture(&mut self, gesture: &str) {
        self.board.set_gesture(gesture);
    }

    fn commit(&mut self) {
        if self.sent.as_ref() == Some(&self.board) {
            return;
        }
        match self.ui_tx.try_send(UiEvent::BoardChanged(self.board.clone())) {
            Ok(()) => {
                self.sent = Some(self.board.clone());
                if let Some(ctx) = &self.repaint {
                    ctx.request_repaint();
                }
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue full; dropping status update");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed");
            }
        }
    }
}
