use crate::error::AppResult;
use crate::services::rate_fetcher::RateFetcher;
use crate::services::snapshot_service::{SnapshotService, SubmitOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};

/// Periodically fetches the remote listing and offers it to the store
pub struct RatePoller {
    fetcher: Arc<RateFetcher>,
    snapshot_service: Arc<SnapshotService>,
    poll_interval: Duration,
}

impl RatePoller {
    /// Create a new rate poller
    pub fn new(fetcher: Arc<RateFetcher>, snapshot_service: Arc<SnapshotService>) -> Self {
        Self {
            fetcher,
            snapshot_service,
            poll_interval: Duration::from_secs(3600), // Default: hourly
        }
    }

    /// Set poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Start polling; the first fetch happens one interval from now, the
    /// startup fetch belongs to the caller
    pub async fn start(self) {
        let mut interval =
            time::interval_at(time::Instant::now() + self.poll_interval, self.poll_interval);
        info!("Rate poller started, polling every {:?}", self.poll_interval);

        loop {
            interval.tick().await;

            match self.poll_once().await {
                Ok(outcome) => info!("Poll finished: {:?}", outcome),
                Err(e) if e.is_transient() => {
                    warn!("No listing this cycle: {}", e);
                }
                Err(e) => error!("Error in rate poller: {}", e),
            }
        }
    }

    /// Fetch once and submit the result
    pub async fn poll_once(&self) -> AppResult<SubmitOutcome> {
        let listing = self.fetcher.fetch().await?;
        Ok(self.snapshot_service.submit_listing(listing).await)
    }
}
