use crate::config::NavigationMode;
use crate::error::RepositoryError;
use crate::models::{Direction, NavigationRequest, Snapshot};
use crate::repositories::{DateRepository, QuoteRepository};
use crate::services::normalizer::rows_to_snapshot;
use std::sync::Arc;
use tracing::{debug, error};

/// Read path: resolves "latest" and previous/next requests to stored snapshots
pub struct Navigator {
    date_repo: Arc<DateRepository>,
    quote_repo: Arc<QuoteRepository>,
    mode: NavigationMode,
}

impl Navigator {
    pub fn new(
        date_repo: Arc<DateRepository>,
        quote_repo: Arc<QuoteRepository>,
        mode: NavigationMode,
    ) -> Self {
        Self {
            date_repo,
            quote_repo,
            mode,
        }
    }

    /// Snapshot for the request, or `None` when there is nothing to show.
    /// Storage errors are logged and also yield `None`.
    pub async fn fetch_snapshot(&self, request: NavigationRequest) -> Option<Snapshot> {
        match self.resolve(request).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to load snapshot for {:?}: {}", request, e);
                None
            }
        }
    }

    /// Most recent stored snapshot
    pub async fn latest(&self) -> Option<Snapshot> {
        self.fetch_snapshot(NavigationRequest::latest()).await
    }

    async fn resolve(&self, request: NavigationRequest) -> Result<Option<Snapshot>, RepositoryError> {
        let target_id = match request.relative_target() {
            None => self.date_repo.find_latest().await?.map(|date| date.id),
            Some((timestamp, direction)) => self.neighbour_id(timestamp, direction).await?,
        };

        let Some(target_id) = target_id else {
            return Ok(None);
        };

        let rows = self.quote_repo.find_rows_by_date(target_id).await?;
        if rows.is_empty() {
            debug!("No quotes stored for date id {}", target_id);
        }
        Ok(rows_to_snapshot(&rows))
    }

    async fn neighbour_id(
        &self,
        timestamp: i64,
        direction: Direction,
    ) -> Result<Option<i64>, RepositoryError> {
        match self.mode {
            NavigationMode::IdOffset => {
                let Some(current) = self.date_repo.find_by_timestamp(timestamp).await? else {
                    debug!("Date {} is not stored", timestamp);
                    return Ok(None);
                };

                // Assumes ids are dense and follow arrival order
                let target = current.id + direction.offset();
                Ok((target > 0).then_some(target))
            }
            NavigationMode::Chronological => {
                let neighbour = match direction {
                    Direction::Previous => self.date_repo.find_before(timestamp).await?,
                    Direction::Next => self.date_repo.find_after(timestamp).await?,
                };
                Ok(neighbour.map(|date| date.id))
            }
        }
    }
}
