//! Outbound alert delivery.

pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::error::NotifyError;

/// A channel that can deliver plain-text messages to a destination chat.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError>;
}
