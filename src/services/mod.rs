pub mod navigator;
pub mod normalizer;
pub mod rate_fetcher;
pub mod rate_poller;
pub mod snapshot_service;

pub use navigator::Navigator;
pub use normalizer::{filter_tracked_currency, listing_to_snapshot, rows_to_snapshot};
pub use rate_fetcher::RateFetcher;
pub use rate_poller::RatePoller;
pub use snapshot_service::{SnapshotService, SubmitOutcome};
