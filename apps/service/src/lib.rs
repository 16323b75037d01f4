//! nodewatch - uptime alerts for a fixed set of nodes
//!
//! Polls an uptime tracker, compares the reported nodes against the configured
//! keys and sends a Telegram message whenever some of them are offline or the
//! tracker itself is unhealthy.

pub mod config;
pub mod error;
pub mod monitoring;
pub mod notify;

use std::time::Duration;

pub use config::{Overrides, WatchConfig};
pub use error::{ConfigError, FetchError, NotifyError, WatchError};
pub use monitoring::{CheckController, CycleOutcome, ExpectedKeys, HttpStatusFetcher, StatusFetcher};
pub use notify::{Notifier, TelegramNotifier};

/// Uptime tracker polled when no status URL is configured
pub const DEFAULT_STATUS_URL: &str = "https://uptime-tracker.skywire.skycoin.com/uptimes";

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default time between two checks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Default timeout for every outbound request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
