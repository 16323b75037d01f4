/// Node monitoring engine
///
/// This module is responsible for:
/// - Fetching node status from the uptime tracker
/// - Evaluating it against the configured keys
/// - Scheduling the periodic checks and raising notifications
pub mod controller;
pub mod fetcher;
pub mod keys;
pub mod scheduler;
pub mod types;
pub mod validation;

pub use controller::CheckController;
pub use fetcher::{HttpStatusFetcher, StatusFetcher};
pub use keys::ExpectedKeys;
pub use types::{CycleOutcome, FetchOutcome, NodeStatus};
