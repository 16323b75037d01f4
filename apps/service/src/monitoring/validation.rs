//! Range and format checks for monitoring settings.
//!
//! Used by the configuration layer before a `WatchConfig` is handed to the
//! monitoring loop.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Shortest allowed interval between checks
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);
/// Longest allowed interval between checks (7 days)
pub const MAX_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);
pub const MAX_TIMEOUT: Duration = Duration::from_secs(300); // 5 minutes

/// Validate check interval
pub fn validate_check_interval(interval: Duration) -> Result<(), ConfigError> {
    validate_range("interval", interval, MIN_INTERVAL, MAX_INTERVAL)
}

/// Validate timeout is reasonable
pub fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    validate_range("timeout", timeout, MIN_TIMEOUT, MAX_TIMEOUT)
}

fn validate_range(
    field: &'static str,
    value: Duration,
    min: Duration,
    max: Duration,
) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value:?} is too short (minimum: {min:?})"),
        });
    }

    if value > max {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value:?} is too long (maximum: {max:?})"),
        });
    }

    Ok(())
}

/// Parse an HTTP/HTTPS URL
pub fn validate_http_url(field: &'static str, target: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(target.trim())
        .map_err(|e| ConfigError::Invalid { field, reason: format!("{target:?}: {e}") })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::Invalid { field, reason: format!("unsupported scheme {other}") });
        }
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Invalid { field, reason: format!("{target:?} has no host") });
    }

    Ok(url)
}

/// Validate the Telegram chat identifier
pub fn validate_chat_id(chat_id: i64) -> Result<(), ConfigError> {
    if chat_id == 0 {
        return Err(ConfigError::Invalid { field: "chat-id", reason: "must not be 0".into() });
    }
    Ok(())
}
