use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::outreach::WeddingDetails;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const SETTINGS_FILE_NAME: &str = "settings.toml";
const APP_DIR_NAME: &str = "guest_desk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub guests_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub wedding: WeddingDetails,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            guests_path: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            wedding: WeddingDetails::default(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    guests_path: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    wedding: Option<WeddingDetails>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub server_url: Option<String>,
    pub guests_path: Option<PathBuf>,
}

/// Defaults, then the settings file, then `GUEST_DESK_*` variables, then CLI flags.
pub fn load_settings(cli: &CliOverrides) -> anyhow::Result<Settings> {
    load_settings_with(cli, default_settings_path(), |name| std::env::var(name).ok())
}

fn load_settings_with(
    cli: &CliOverrides,
    default_path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_cfg = match (&cli.config_path, default_path) {
        (Some(path), _) => Some(read_settings_file(path)?),
        (None, Some(path)) if path.is_file() => Some(read_settings_file(&path)?),
        _ => None,
    };
    if let Some(file_cfg) = file_cfg {
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.guests_path {
            settings.guests_path = Some(v);
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.wedding {
            settings.wedding = v;
        }
    }

    if let Some(v) = env("GUEST_DESK_SERVER_URL").filter(|v| !v.trim().is_empty()) {
        settings.server_url = v;
    }
    if let Some(v) = env("GUEST_DESK_GUESTS").filter(|v| !v.trim().is_empty()) {
        settings.guests_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("GUEST_DESK_REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => tracing::warn!("ignoring GUEST_DESK_REQUEST_TIMEOUT_SECS={v:?}: {err}"),
        }
    }

    if let Some(v) = &cli.server_url {
        settings.server_url = v.clone();
    }
    if let Some(v) = &cli.guests_path {
        settings.guests_path = Some(v.clone());
    }

    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid settings file {}", path.display()))
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::outreach::MessageSender;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_sources() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings_with(
            &CliOverrides::default(),
            Some(dir.path().join("missing.toml")),
            no_env,
        )
        .expect("settings");

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn file_env_and_cli_layer_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            r#"
server_url = "http://file.local:5000"
guests_path = "/srv/guests.json"
request_timeout_secs = 3

[wedding]
bride_name = "Mary"
message_sender = "bride"
"#,
        )
        .expect("write");

        let env: HashMap<&str, &str> = HashMap::from([
            ("GUEST_DESK_SERVER_URL", "http://env.local:5000"),
            ("GUEST_DESK_REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]);
        let cli = CliOverrides {
            guests_path: Some(PathBuf::from("cli.json")),
            ..CliOverrides::default()
        };

        let settings = load_settings_with(&cli, Some(path), |name| {
            env.get(name).map(|v| v.to_string())
        })
        .expect("settings");

        assert_eq!(settings.server_url, "http://env.local:5000");
        assert_eq!(settings.guests_path, Some(PathBuf::from("cli.json")));
        assert_eq!(settings.request_timeout_secs, 3);
        assert_eq!(settings.wedding.bride_name, "Mary");
        assert_eq!(settings.wedding.groom_name, "Charles");
        assert_eq!(settings.wedding.message_sender, MessageSender::Bride);
    }

    #[test]
    fn explicit_config_must_be_readable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = CliOverrides {
            config_path: Some(dir.path().join("nope.toml")),
            ..CliOverrides::default()
        };

        let err = load_settings_with(&cli, None, no_env).expect_err("missing file");
        assert!(err.to_string().contains("failed to read settings file"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "sever_url = \"typo\"\n").expect("write");
        let cli = CliOverrides {
            config_path: Some(path),
            ..CliOverrides::default()
        };

        assert!(load_settings_with(&cli, None, no_env).is_err());
    }
}
