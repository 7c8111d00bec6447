//! USD Rates Library
//!
//! Keeps a local history of USD cash-rate listings and navigates it. The
//! write path is [`services::SnapshotService::submit_snapshot`], the read
//! path is [`services::Navigator::fetch_snapshot`].

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod presenter;
pub mod repositories;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use config::NavigationMode;
use database::Database;
use repositories::*;
use services::{Navigator, SnapshotService};
use std::sync::Arc;

/// Application state owning the store and everything built on it
pub struct AppState {
    pub database: Database,
    pub date_repo: Arc<DateRepository>,
    pub organization_repo: Arc<OrganizationRepository>,
    pub quote_repo: Arc<QuoteRepository>,
    pub snapshot_service: Arc<SnapshotService>,
    pub navigator: Arc<Navigator>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::SqlitePool, navigation_mode: NavigationMode) -> Self {
        let database = Database::new(pool);

        let date_repo = Arc::new(DateRepository::new(database.pool().clone()));
        let organization_repo = Arc::new(OrganizationRepository::new(database.pool().clone()));
        let quote_repo = Arc::new(QuoteRepository::new(database.pool().clone()));

        let snapshot_service = Arc::new(SnapshotService::new(
            date_repo.clone(),
            organization_repo.clone(),
            quote_repo.clone(),
        ));
        let navigator = Arc::new(Navigator::new(
            date_repo.clone(),
            quote_repo.clone(),
            navigation_mode,
        ));

        Self {
            database,
            date_repo,
            organization_repo,
            quote_repo,
            snapshot_service,
            navigator,
        }
    }
}
