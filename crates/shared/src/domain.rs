use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback state as reported by the player service.
///
/// Any value other than the three known states is kept verbatim so it can be
/// logged; it renders the same way as `Stopped`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    Other(String),
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PlaybackStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "stopped" => Self::Stopped,
            _ => Self::Other(value),
        }
    }
}

impl From<PlaybackStatus> for String {
    fn from(value: PlaybackStatus) -> Self {
        match value {
            PlaybackStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands understood by the player's control endpoint.
///
/// The client does not restrict callers to this set; it only drives the
/// buttons and help text of the front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
}

impl ControlAction {
    pub const ALL: [ControlAction; 5] = [
        ControlAction::Play,
        ControlAction::Pause,
        ControlAction::Stop,
        ControlAction::Next,
        ControlAction::Previous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
            Self::Stop => "Stop",
            Self::Next => "Next",
            Self::Previous => "Previous",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown control action '{0}'")]
pub struct UnknownControlAction(pub String);

impl FromStr for ControlAction {
    type Err = UnknownControlAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| UnknownControlAction(s.to_string()))
    }
}
