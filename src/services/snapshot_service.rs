use crate::error::RepositoryError;
use crate::models::{parse_listing_date, OrganizationListing, RemoteListing};
use crate::repositories::{DateRepository, OrganizationRepository, QuoteRepository};
use crate::services::normalizer::filter_tracked_currency;
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Result of offering a snapshot to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Date and all quotes written
    Saved { date_id: i64, quotes_written: usize },
    /// Timestamp not newer than the stored maximum; nothing written
    Stale { latest: i64 },
    /// No organization quotes the tracked currency; nothing written
    NoTrackedQuotes,
    /// A write failed; rows written before the failure are kept
    Failed { quotes_written: usize },
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}

/// Write path: accepts fetched listings and records new snapshots
pub struct SnapshotService {
    date_repo: Arc<DateRepository>,
    organization_repo: Arc<OrganizationRepository>,
    quote_repo: Arc<QuoteRepository>,
    /// Held from the staleness check to the last quote insert; the poller and
    /// a manual refresh may submit the same listing at once
    write_lock: Mutex<()>,
}

impl SnapshotService {
    pub fn new(
        date_repo: Arc<DateRepository>,
        organization_repo: Arc<OrganizationRepository>,
        quote_repo: Arc<QuoteRepository>,
    ) -> Self {
        Self {
            date_repo,
            organization_repo,
            quote_repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Submit a listing exactly as the remote endpoint delivered it
    pub async fn submit_listing(&self, listing: RemoteListing) -> SubmitOutcome {
        let timestamp = match parse_listing_date(&listing.date) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                error!("Discarding listing: {}", e);
                return SubmitOutcome::Failed { quotes_written: 0 };
            }
        };

        self.submit_snapshot(timestamp, listing.organizations).await
    }

    /// Record the snapshot if it is newer than everything stored and quotes
    /// the tracked currency. Errors are logged, never returned.
    pub async fn submit_snapshot(
        &self,
        timestamp: i64,
        organizations: Vec<OrganizationListing>,
    ) -> SubmitOutcome {
        let organizations = filter_tracked_currency(organizations);
        if organizations.is_empty() {
            debug!("Snapshot {} has no tracked quotes, skipping", timestamp);
            return SubmitOutcome::NoTrackedQuotes;
        }

        let _guard = self.write_lock.lock().await;

        let latest = match self.date_repo.max_timestamp().await {
            Ok(latest) => latest,
            Err(e) => {
                error!("Failed to read latest stored date: {}", e);
                return SubmitOutcome::Failed { quotes_written: 0 };
            }
        };

        if let Some(latest) = latest {
            if timestamp <= latest {
                debug!("Snapshot {} is not newer than {}, skipping", timestamp, latest);
                return SubmitOutcome::Stale { latest };
            }
        }

        self.save(timestamp, &organizations).await
    }

    async fn save(&self, timestamp: i64, organizations: &[OrganizationListing]) -> SubmitOutcome {
        let date = match self.date_repo.insert_if_absent(timestamp).await {
            Ok(date) => date,
            Err(e) => {
                error!("Failed to store date {}: {}", timestamp, RepositoryError::from(e));
                return SubmitOutcome::Failed { quotes_written: 0 };
            }
        };

        let failed = Arc::new(AtomicBool::new(false));
        let mut pending = Vec::with_capacity(organizations.len());

        for org in organizations {
            if failed.load(Ordering::Acquire) {
                break;
            }
            let Some(rate) = org.tracked_rate().copied() else {
                continue;
            };

            // The quote needs the organization id, so this insert is awaited
            let stored = match self
                .organization_repo
                .insert_if_absent(&org.title, org.org_type)
                .await
            {
                Ok(stored) => stored,
                Err(e) => {
                    error!(
                        "Failed to store organization {}: {}",
                        org.title,
                        RepositoryError::from(e)
                    );
                    failed.store(true, Ordering::Release);
                    break;
                }
            };

            let quote_repo = Arc::clone(&self.quote_repo);
            let failed = Arc::clone(&failed);
            let date_id = date.id;
            pending.push(tokio::spawn(async move {
                if failed.load(Ordering::Acquire) {
                    return None;
                }
                let result = quote_repo
                    .create(rate.ask, rate.bid, stored.id, date_id)
                    .await;
                if let Err(e) = &result {
                    error!("Failed to store quote for {}: {}", stored.name, e);
                    failed.store(true, Ordering::Release);
                }
                Some(result)
            }));
        }

        let mut quotes_written = 0;
        for joined in join_all(pending).await {
            match joined {
                Ok(Some(Ok(_))) => quotes_written += 1,
                Ok(Some(Err(_))) | Ok(None) => {}
                Err(e) => {
                    error!("Quote insert task aborted: {}", e);
                    failed.store(true, Ordering::Release);
                }
            }
        }

        if failed.load(Ordering::Acquire) {
            warn!(
                "Snapshot {} partially stored: {} of {} quotes",
                timestamp,
                quotes_written,
                organizations.len()
            );
            return SubmitOutcome::Failed { quotes_written };
        }

        info!(
            "Stored snapshot {} (date id {}) with {} quotes",
            timestamp, date.id, quotes_written
        );
        SubmitOutcome::Saved {
            date_id: date.id,
            quotes_written,
        }
    }
}
