use tracing::{info, warn};

use super::fetcher::StatusFetcher;
use super::keys::ExpectedKeys;
use super::types::{CycleOutcome, FetchOutcome};
use crate::error::WatchError;
use crate::notify::Notifier;

/// Message sent once before the first check.
pub const STARTUP_MESSAGE: &str = "Server started";

/// Runs one fetch-evaluate-notify cycle at a time against a fixed set of keys.
pub struct CheckController<F, N> {
    keys: ExpectedKeys,
    fetcher: F,
    notifier: N,
    chat_id: i64,
}

impl<F, N> CheckController<F, N>
where
    F: StatusFetcher,
    N: Notifier,
{
    pub fn new(keys: ExpectedKeys, fetcher: F, notifier: N, chat_id: i64) -> Self {
        Self { keys, fetcher, notifier, chat_id }
    }

    pub fn keys(&self) -> &ExpectedKeys {
        &self.keys
    }

    pub async fn announce_start(&self) -> Result<(), WatchError> {
        self.notifier.send(self.chat_id, STARTUP_MESSAGE).await?;
        Ok(())
    }

    /// Run a single check.
    ///
    /// An unhealthy status source and offline nodes are reported through the notifier
    /// and returned as the outcome. Fetch and notification failures are returned as errors.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, WatchError> {
        let outcome = match self.fetcher.fetch().await? {
            FetchOutcome::Unhealthy { status } => {
                warn!(status, "Status service is down");
                CycleOutcome::ServiceUnhealthy { status }
            }
            FetchOutcome::Nodes(nodes) => {
                let evaluation = self.keys.evaluate(&nodes);
                for report in &evaluation.reports {
                    info!("{report}");
                }

                let outcome = CycleOutcome::from(&evaluation);
                if let CycleOutcome::PartialOutage { found, total } = outcome {
                    warn!(found, total, "Some nodes are down");
                }
                outcome
            }
        };

        if let Some(message) = outcome.notification() {
            self.notifier.send(self.chat_id, &message).await?;
        }

        Ok(outcome)
    }
}
