use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "status.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000/".into(),
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Debug, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    poll_interval_ms: Option<u64>,
}

impl Settings {
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let url = Url::parse(self.server_url.trim()).map_err(|source| {
            SettingsError::InvalidServerUrl {
                url: self.server_url.clone(),
                source,
            }
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(SettingsError::UnsupportedScheme(self.server_url.clone())),
        }
    }

    pub fn poll_interval(&self) -> Result<Duration, SettingsError> {
        if self.poll_interval_ms == 0 {
            return Err(SettingsError::ZeroPollInterval);
        }
        Ok(Duration::from_millis(self.poll_interval_ms))
    }
}

/// Defaults, then `status.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };

    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.server_url {
                settings.server_url = v;
            }
            if let Some(v) = file_cfg.poll_interval_ms {
                settings.poll_interval_ms = v;
            }
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
        }
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("STATUS_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__POLL_INTERVAL_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.poll_interval_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__POLL_INTERVAL_MS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_settings_file(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("status_panel_settings_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn defaults_poll_once_per_second() {
        let settings = Settings::default();
        assert_eq!(settings.poll_interval().expect("interval"), Duration::from_secs(1));
        assert_eq!(
            settings.base_url().expect("url").as_str(),
            "http://127.0.0.1:5000/"
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let path =
            temp_settings_file("server_url = \"http://player:8080/\"\npoll_interval_ms = 250\n");
        let mut settings = Settings::default();
        apply_file(&mut settings, &path);
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings.server_url, "http://player:8080/");
        assert_eq!(settings.poll_interval_ms, 250);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let path = temp_settings_file("poll_interval_ms = \"fast\"");
        let mut settings = Settings::default();
        apply_file(&mut settings, &path);
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn app_prefixed_env_wins_over_legacy_name() {
        let mut settings = Settings::default();
        apply_env(
            &mut settings,
            env_from(&[
                ("STATUS_SERVER_URL", "http://legacy/"),
                ("APP__SERVER_URL", "http://app/"),
                ("APP__POLL_INTERVAL_MS", "500"),
            ]),
        );
        assert_eq!(settings.server_url, "http://app/");
        assert_eq!(settings.poll_interval_ms, 500);
    }

    #[test]
    fn non_numeric_interval_env_is_ignored() {
        let mut settings = Settings::default();
        apply_env(&mut settings, env_from(&[("APP__POLL_INTERVAL_MS", "soon")]));
        assert_eq!(settings.poll_interval_ms, 1000);
    }

    #[test]
    fn rejects_zero_interval_and_bad_urls() {
        let settings = Settings {
            server_url: "ftp://player/".into(),
            poll_interval_ms: 0,
        };
        assert!(matches!(
            settings.poll_interval(),
            Err(SettingsError::ZeroPollInterval)
        ));
        assert!(matches!(
            settings.base_url(),
            Err(SettingsError::UnsupportedScheme(_))
        ));

        let settings = Settings {
            server_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.base_url(),
            Err(SettingsError::InvalidServerUrl { .. })
        ));
    }
}
