use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::PlaybackStatus;

/// Body returned by both `GET /status` and `GET /control/{action}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(default = "unreported_status", deserialize_with = "status_or_unreported")]
    pub status: PlaybackStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub song: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture: Option<String>,
}

impl StatusPayload {
    pub fn new(status: PlaybackStatus, song: impl Into<String>) -> Self {
        Self {
            status,
            song: song.into(),
            gesture: None,
        }
    }

    pub fn with_gesture(mut self, gesture: impl Into<String>) -> Self {
        self.gesture = Some(gesture.into());
        self
    }
}

// A missing or `null` status renders as stopped, like any unknown value.
fn unreported_status() -> PlaybackStatus {
    PlaybackStatus::Other(String::new())
}

fn status_or_unreported<'de, D>(deserializer: D) -> Result<PlaybackStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PlaybackStatus::from(
        Option::<String>::deserialize(deserializer)?.unwrap_or_default(),
    ))
}

// The player reports `null` or omits the song before anything has been loaded.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_payload_without_gesture() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":"paused","song":"X"}"#).expect("decode");
        assert_eq!(payload, StatusPayload::new(PlaybackStatus::Paused, "X"));
    }

    #[test]
    fn decodes_null_gesture_and_null_song() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":"stopped","song":null,"gesture":null}"#)
                .expect("decode");
        assert_eq!(payload.song, "");
        assert_eq!(payload.gesture, None);
    }

    #[test]
    fn missing_song_decodes_as_empty() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":"playing","gesture":"fist"}"#).expect("decode");
        assert_eq!(
            payload,
            StatusPayload::new(PlaybackStatus::Playing, "").with_gesture("fist")
        );
    }

    #[test]
    fn missing_status_decodes_as_unreported() {
        let payload: StatusPayload = serde_json::from_str(r#"{"song":"A"}"#).expect("decode");
        assert_eq!(payload.status, PlaybackStatus::Other(String::new()));
        assert_eq!(payload.song, "A");
    }

    #[test]
    fn null_status_decodes_as_unreported() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":null,"song":"A"}"#).expect("decode");
        assert_eq!(payload.status, PlaybackStatus::Other(String::new()));
        assert_eq!(payload.song, "A");
    }

    #[test]
    fn wrongly_typed_status_is_rejected() {
        serde_json::from_str::<StatusPayload>(r#"{"status":3,"song":"A"}"#)
            .expect_err("status must be a string");
    }

    #[test]
    fn keeps_unknown_status_and_extra_fields() {
        let payload: StatusPayload = serde_json::from_str(
            r#"{"status":"buffering","song":"Intro","gesture":"ok","volume":40}"#,
        )
        .expect("decode");
        assert_eq!(payload.status, PlaybackStatus::Other("buffering".into()));
        assert_eq!(payload.gesture.as_deref(), Some("ok"));
    }
}
