//! Line-oriented view: prints the panel whenever a render changes it.

use std::io::Write;

use client_core::{Indicator, StatusBoard, StatusView};

pub struct TerminalView<W> {
    out: W,
    board: StatusBoard,
    printed: Option<StatusBoard>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            board: StatusBoard::default(),
            printed: None,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

pub fn format_board(board: &StatusBoard) -> String {
    let marker = match board.indicator() {
        Indicator::Playing => "▶",
        Indicator::Paused => "⏸",
        Indicator::Neutral => "■",
    };
    format!(
        "{marker} {} | {} | gesture: {}",
        board.status_text(),
        board.song_info(),
        board.current_gesture()
    )
}

impl<W: Write + Send> StatusView for TerminalView<W> {
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
        if self.printed.as_ref() == Some(&self.board) {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", format_board(&self.board)) {
            tracing::warn!(error = %err, "failed to write status line");
            return;
        }
        self.printed = Some(self.board.clone());
    }
}
