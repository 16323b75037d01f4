use std::{env, fmt, fs, path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::monitoring::ExpectedKeys;
use crate::monitoring::validation::{
    validate_chat_id, validate_check_interval, validate_http_url, validate_timeout,
};
use crate::{DEFAULT_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STATUS_URL, DEFAULT_TELEGRAM_API_URL};

/// Contents of `config.toml`. Every setting is optional here.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub monitor: MonitorSection,
    pub telegram: TelegramSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorSection {
    pub interval: Option<String>,
    pub timeout: Option<String>,
    pub status_url: Option<String>,
    pub keys: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelegramSection {
    pub token: Option<String>,
    pub chat_id: Option<i64>,
    pub api_url: Option<String>,
}

/// Settings coming from the command line or the environment. They win over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub interval: Option<Duration>,
    pub timeout: Option<Duration>,
    pub status_url: Option<String>,
    pub keys: Option<Vec<String>>,
    pub telegram_token: Option<String>,
    pub chat_id: Option<i64>,
    pub telegram_api_url: Option<String>,
}

/// Validated configuration handed to the monitoring loop.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub interval: Duration,
    pub request_timeout: Duration,
    pub status_url: Url,
    pub keys: ExpectedKeys,
    pub telegram: TelegramConfig,
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: i64,
    pub api_url: Url,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &mask_token(&self.token))
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/nodewatch/config.toml or
/// $HOME/.config/...)
pub fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(ConfigError::ConfigPathUnavailable);
    };

    Ok(path.join("nodewatch/config.toml"))
}

impl FileConfig {
    /// Read the configuration file.
    ///
    /// An explicitly given path must exist. When no path is given the default location
    /// is tried and a missing file yields an empty configuration.
    ///
    /// ```rust,ignore
    /// let file = config::FileConfig::load(None::<&path::Path>)?;
    /// ```
    pub fn load(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let (config_path, required) = match optional_path {
            Some(path) => (normalize_toml_path(path.as_ref()), true),
            None => (default_config_path()?, false),
        };

        if !config_path.exists() {
            return if required { Err(ConfigError::NotFound(config_path)) } else { Ok(Self::default()) };
        }

        let raw_string = fs::read_to_string(&config_path)
            .map_err(|source| ConfigError::ReadFailed { path: config_path.clone(), source })?;
        toml::from_str(raw_string.as_str())
            .map_err(|source| ConfigError::ParseFailed { path: config_path, source })
    }
}

impl WatchConfig {
    /// Merge defaults, file and overrides, then validate the result.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let FileConfig { monitor, telegram } = file;

        let interval = match (overrides.interval, monitor.interval) {
            (Some(interval), _) => interval,
            (None, Some(raw)) => parse_duration(&raw)?,
            (None, None) => DEFAULT_INTERVAL,
        };
        validate_check_interval(interval)?;

        let request_timeout = match (overrides.timeout, monitor.timeout) {
            (Some(timeout), _) => timeout,
            (None, Some(raw)) => parse_duration(&raw)?,
            (None, None) => DEFAULT_REQUEST_TIMEOUT,
        };
        validate_timeout(request_timeout)?;

        let status_url = overrides
            .status_url
            .or(monitor.status_url)
            .unwrap_or_else(|| DEFAULT_STATUS_URL.to_string());
        let status_url = validate_http_url("status-url", &status_url)?;

        let keys = overrides
            .keys
            .filter(|keys| !keys.is_empty())
            .or(monitor.keys)
            .ok_or(ConfigError::Missing("keys"))?;
        let keys = ExpectedKeys::new(keys)?;

        let token = overrides
            .telegram_token
            .or(telegram.token)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing("telegram-token"))?;

        let chat_id = overrides.chat_id.or(telegram.chat_id).ok_or(ConfigError::Missing("chat-id"))?;
        validate_chat_id(chat_id)?;

        let api_url = overrides
            .telegram_api_url
            .or(telegram.api_url)
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());
        let api_url = validate_http_url("telegram-api-url", &api_url)?;

        Ok(Self {
            interval,
            request_timeout,
            status_url,
            keys,
            telegram: TelegramConfig { token, chat_id, api_url },
        })
    }
}

impl fmt::Display for WatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Interval", &humantime::format_duration(self.interval))?;
        write_1(f, "Request Timeout", &humantime::format_duration(self.request_timeout))?;
        write_1(f, "Status URL", &self.status_url)?;
        write_1(f, "Keys", &self.keys.iter().collect::<Vec<_>>().join(", "))?;
        write_title_1(f, "Telegram")?;
        write_1(f, "Token", &mask_token(&self.telegram.token))?;
        write_1(f, "Chat ID", &self.telegram.chat_id)?;
        write_1(f, "API URL", &self.telegram.api_url)?;

        Ok(())
    }
}

/// Keep only the bot id part of a `<id>:<secret>` token.
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _)) => format!("{bot_id}:****"),
        None => "****".to_string(),
    }
}

/// Parse a duration such as `1h`, `15m`, `90s`, `500ms` or `1h 30m`.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(input.trim()).map_err(|_| ConfigError::InvalidDuration(input.to_string()))
}
