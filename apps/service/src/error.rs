use std::{io, path::PathBuf};

use thiserror::Error;

/// Boxed cause carried by the transport variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of the status source. All of them are fatal to the process.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build the status HTTP client")]
    Client(#[source] BoxError),
    #[error("status source unreachable")]
    Transport(#[source] BoxError),
    #[error("status response could not be decoded")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build the notification HTTP client")]
    Client(#[source] BoxError),
    #[error("notification request failed")]
    Transport(#[source] BoxError),
    #[error("notification channel replied with an unreadable response")]
    Malformed(#[source] BoxError),
    #[error("notification rejected ({}): {description}", .code.map_or_else(|| "no code".to_string(), |code| code.to_string()))]
    Rejected { code: Option<i64>, description: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory, set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,
    #[error("configuration file {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration {0:?}, expected values like 1h, 15m, 90s or 1h 30m")]
    InvalidDuration(String),
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that stop the monitoring loop.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
