use std::future::Future;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::controller::CheckController;
use super::fetcher::StatusFetcher;
use crate::error::WatchError;
use crate::notify::Notifier;

/// Run checks immediately and then once per `period` until `shutdown` resolves.
///
/// `shutdown` is only observed between cycles; a started cycle always completes.
/// The first fatal error ends the loop and is returned.
pub async fn run<F, N>(
    controller: &CheckController<F, N>,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<(), WatchError>
where
    F: StatusFetcher,
    N: Notifier,
{
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!("Shutdown requested, stopping checks");
                return Ok(());
            }
            _ = timer.tick() => {}
        }

        let outcome = controller.run_cycle().await?;
        debug!(?outcome, "Check finished");
    }
}
