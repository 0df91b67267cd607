//! Pure mapping from a status payload to what the panel shows.
//!
//! `UiState` is derived from a payload without touching any view; `render`
//! then pushes it into a `StatusView`. The four regions keep the element ids
//! the web panel used so front ends can stay interchangeable.

use shared::{domain::PlaybackStatus, protocol::StatusPayload};

pub const STATUS_INDICATOR_ID: &str = "status-indicator";
pub const STATUS_TEXT_ID: &str = "status-text";
pub const SONG_INFO_ID: &str = "song-info";
pub const CURRENT_GESTURE_ID: &str = "current-gesture";

/// Base class the indicator always carries.
pub const INDICATOR_BASE_CLASS: &str = "status-indicator";

const NO_GESTURE: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indicator {
    #[default]
    Neutral,
    Playing,
    Paused,
}

impl Indicator {
    /// Extra class on top of the base class, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Playing => Some("playing"),
            Self::Paused => Some("paused"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

impl From<&PlaybackStatus> for Indicator {
    fn from(status: &PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Playing => Self::Playing,
            PlaybackStatus::Paused => Self::Paused,
            PlaybackStatus::Stopped | PlaybackStatus::Other(_) => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub indicator: Indicator,
    pub song: String,
    /// `None` leaves the gesture region as it is.
    pub gesture: Option<String>,
}

impl UiState {
    /// State for a `/status` response: all four regions.
    pub fn from_status(payload: &StatusPayload) -> Self {
        Self {
            indicator: Indicator::from(&payload.status),
            song: payload.song.clone(),
            gesture: Some(gesture_label(payload.gesture.as_deref())),
        }
    }

    /// State for a `/control` response: the gesture region is not touched.
    pub fn from_control(payload: &StatusPayload) -> Self {
        Self {
            indicator: Indicator::from(&payload.status),
            song: payload.song.clone(),
            gesture: None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.indicator.label()
    }
}

/// Upper-cases the first character; absent or empty reads "None".
pub fn gesture_label(gesture: Option<&str>) -> String {
    let mut chars = gesture.unwrap_or_default().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => NO_GESTURE.to_string(),
    }
}

pub trait StatusView: Send {
    fn set_indicator(&mut self, indicator: Indicator);
    fn set_status_text(&mut self, text: &str);
    fn set_song(&mut self, song: &str);
    fn set_gesture(&mut self, gesture: &str);

    /// Called once after every region of a render has been written.
    fn commit(&mut self) {}
}

pub fn render<V: StatusView + ?Sized>(state: &UiState, view: &mut V) {
    view.set_indicator(state.indicator);
    view.set_status_text(state.status_label());
    view.set_song(&state.song);
    if let Some(gesture) = &state.gesture {
        view.set_gesture(gesture);
    }
    view.commit();
}

/// In-memory panel: the four regions keyed by element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBoard {
    indicator: Indicator,
    status_text: String,
    song_info: String,
    current_gesture: String,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            indicator: Indicator::Neutral,
            status_text: Indicator::Neutral.label().to_string(),
            song_info: String::new(),
            current_gesture: NO_GESTURE.to_string(),
        }
    }
}

impl StatusBoard {
    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn song_info(&self) -> &str {
        &self.song_info
    }

    pub fn current_gesture(&self) -> &str {
        &self.current_gesture
    }

    /// Class list of the indicator element.
    pub fn indicator_classes(&self) -> Vec<&'static str> {
        let mut classes = vec![INDICATOR_BASE_CLASS];
        classes.extend(self.indicator.class());
        classes
    }

    /// Text content of a region by element id.
    pub fn text(&self, element_id: &str) -> Option<&str> {
        match element_id {
            STATUS_TEXT_ID => Some(&self.status_text),
            SONG_INFO_ID => Some(&self.song_info),
            CURRENT_GESTURE_ID => Some(&self.current_gesture),
            _ => None,
        }
    }
}

impl StatusView for StatusBoard {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
    }

    fn set_status_text(&mut self, text: &str) {
        text.clone_into(&mut self.status_text);
    }

    fn set_song(&mut self, song: &str) {
        song.clone_into(&mut self.song_info);
    }

    fn set_gesture(&mut self, gesture: &str) {
        gesture.clone_into(&mut self.current_gesture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(status: &str, song: &str, gesture: Option<&str>) -> StatusPayload {
        StatusPayload {
            status: PlaybackStatus::from(status.to_string()),
            song: song.to_string(),
            gesture: gesture.map(str::to_string),
        }
    }

    fn rendered(state: &UiState) -> StatusBoard {
        let mut board = StatusBoard::default();
        render(state, &mut board);
        board
    }

    #[test]
    fn playing_sets_playing_class_and_label() {
        let board = rendered(&UiState::from_status(&payload("playing", "A", None)));
        assert_eq!(board.indicator_classes(), vec!["status-indicator", "playing"]);
        assert_eq!(board.text(STATUS_TEXT_ID), Some("Playing"));
    }

    #[test]
    fn paused_sets_paused_class_and_label() {
        let board = rendered(&UiState::from_status(&payload("paused", "A", None)));
        assert_eq!(board.indicator_classes(), vec!["status-indicator", "paused"]);
        assert_eq!(board.text(STATUS_TEXT_ID), Some("Paused"));
    }

    #[test]
    fn stopped_and_unknown_statuses_render_neutral() {
        for status in ["stopped", "buffering", "", "PLAYING"] {
            let mut board = StatusBoard::default();
            render(
                &UiState::from_status(&payload("playing", "A", None)),
                &mut board,
            );
            render(&UiState::from_status(&payload(status, "A", None)), &mut board);
            assert_eq!(board.indicator_classes(), vec!["status-indicator"], "{status}");
            assert_eq!(board.status_text(), "Stopped", "{status}");
        }
    }

    #[test]
    fn gesture_is_capitalized() {
        assert_eq!(gesture_label(Some("fist")), "Fist");
        assert_eq!(gesture_label(Some("ok")), "Ok");
        assert_eq!(gesture_label(Some("peace sign")), "Peace sign");
        assert_eq!(gesture_label(Some("éclair")), "Éclair");
    }

    #[test]
    fn absent_or_empty_gesture_reads_none() {
        assert_eq!(gesture_label(None), "None");
        assert_eq!(gesture_label(Some("")), "None");
    }

    #[test]
    fn song_is_rendered_verbatim() {
        let song = "  Björk – Jóga (live) \u{1F3B5} ";
        let board = rendered(&UiState::from_status(&payload("playing", song, None)));
        assert_eq!(board.song_info().as_bytes(), song.as_bytes());
    }

    #[test]
    fn control_state_leaves_gesture_untouched() {
        let mut board = StatusBoard::default();
        render(
            &UiState::from_status(&payload("playing", "A", Some("fist"))),
            &mut board,
        );
        render(
            &UiState::from_control(&payload("paused", "X", Some("ok"))),
            &mut board,
        );
        assert_eq!(board.indicator(), Indicator::Paused);
        assert_eq!(board.song_info(), "X");
        assert_eq!(board.current_gesture(), "Fist");
    }

    #[test]
    fn unknown_element_id_has_no_text() {
        assert_eq!(StatusBoard::default().text(STATUS_INDICATOR_ID), None);
    }
}
