#![allow(dead_code)]

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use usd_rates::config::{FetchConfig, NavigationMode};
use usd_rates::database::{create_memory_pool, initialize};
use usd_rates::models::*;
use usd_rates::repositories::*;
use usd_rates::services::{Navigator, RateFetcher, SnapshotService, SubmitOutcome};

/// Epoch milliseconds of 2024-01-01T00:00:00Z
pub const JAN_1: i64 = 1_704_067_200_000;
pub const DAY_MS: i64 = 86_400_000;

/// Test database backed by a private in-memory store
pub struct TestDatabase {
    pub pool: SqlitePool,
    pub date_repo: Arc<DateRepository>,
    pub organization_repo: Arc<OrganizationRepository>,
    pub quote_repo: Arc<QuoteRepository>,
    pub snapshot_service: Arc<SnapshotService>,
    pub navigator: Arc<Navigator>,
}

impl TestDatabase {
    /// Fresh store with the schema created, id-offset navigation
    pub async fn new() -> Self {
        Self::with_mode(NavigationMode::IdOffset).await
    }

    pub async fn with_mode(mode: NavigationMode) -> Self {
        let pool = create_memory_pool()
            .await
            .expect("Failed to create test database pool");

        initialize(&pool)
            .await
            .expect("Failed to create schema");

        Self::from_pool(pool, mode)
    }

    /// Create TestDatabase from an existing pool
    pub fn from_pool(pool: SqlitePool, mode: NavigationMode) -> Self {
        let date_repo = Arc::new(DateRepository::new(pool.clone()));
        let organization_repo = Arc::new(OrganizationRepository::new(pool.clone()));
        let quote_repo = Arc::new(QuoteRepository::new(pool.clone()));

        Self {
            snapshot_service: Arc::new(SnapshotService::new(
                date_repo.clone(),
                organization_repo.clone(),
                quote_repo.clone(),
            )),
            navigator: Arc::new(Navigator::new(date_repo.clone(), quote_repo.clone(), mode)),
            pool,
            date_repo,
            organization_repo,
            quote_repo,
        }
    }

    /// Row counts of (dates, organizations, quotes)
    pub async fn counts(&self) -> (i64, i64, i64) {
        (
            self.date_repo.count().await.expect("Failed to count dates"),
            self.organization_repo
                .count()
                .await
                .expect("Failed to count organizations"),
            self.quote_repo.count().await.expect("Failed to count quotes"),
        )
    }

    /// Submit and require the snapshot to be stored
    pub async fn submit(&self, timestamp: i64, organizations: Vec<OrganizationListing>) -> i64 {
        match self
            .snapshot_service
            .submit_snapshot(timestamp, organizations)
            .await
        {
            SubmitOutcome::Saved { date_id, .. } => date_id,
            other => panic!("Expected snapshot {} to be saved, got {:?}", timestamp, other),
        }
    }
}

/// Organization quoting only USD
pub fn usd_org(title: &str, org_type: i64, ask: f64, bid: f64) -> OrganizationListing {
    OrganizationListing::tracked(title, org_type, ask, bid)
}

/// Organization quoting only EUR
pub fn eur_only_org(title: &str, org_type: i64) -> OrganizationListing {
    let mut org = OrganizationListing::tracked(title, org_type, 30.0, 29.5);
    let rate = org
        .currencies
        .remove(TRACKED_CURRENCY)
        .expect("tracked rate present");
    org.currencies.insert("EUR".to_string(), rate);
    org
}

/// A typical listing: two USD quoters and one EUR-only exchanger
pub fn sample_organizations(shift: f64) -> Vec<OrganizationListing> {
    vec![
        usd_org("BankA", 1, 27.5 + shift, 27.0 + shift),
        usd_org("Kiosk", 2, 27.7 + shift, 27.2 + shift),
        eur_only_org("EuroHouse", 2),
    ]
}

/// Assert that two snapshots hold the same quotes, ignoring row order
pub fn assert_snapshots_equal(actual: &Snapshot, expected: &Snapshot) {
    assert_eq!(actual.date, expected.date);

    let sorted = |snapshot: &Snapshot| {
        let mut orgs = snapshot.organizations.clone();
        orgs.sort_by(|a, b| (a.title.as_str(), a.org_type).cmp(&(b.title.as_str(), b.org_type)));
        orgs
    };
    assert_eq!(sorted(actual), sorted(expected));
}

/// Snapshot expected back from the store for the given submission
pub fn expected_snapshot(timestamp: i64, organizations: &[OrganizationListing]) -> Snapshot {
    usd_rates::services::listing_to_snapshot(timestamp, organizations)
}

/// Serve `body` with the given status to every request on a local port and
/// return the listing URL
pub async fn serve_listing(status: u16, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listing server");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/ru/public/currency-cash.json", addr)
}

/// Fetcher pointed at a local listing server
pub fn local_fetcher(api_url: String) -> Arc<RateFetcher> {
    let config = FetchConfig {
        api_url,
        request_timeout_secs: 5,
        ..FetchConfig::default()
    };
    Arc::new(RateFetcher::new(&config).expect("Failed to build fetcher"))
}

/// Listing body in the remote endpoint's shape, rates as decimal strings
pub fn listing_body(date: &str, organizations: &[(&str, i64, &str, &str, &str)]) -> String {
    let organizations: Vec<serde_json::Value> = organizations
        .iter()
        .map(|(title, org_type, code, ask, bid)| {
            let mut currencies = serde_json::Map::new();
            currencies.insert(code.to_string(), serde_json::json!({ "ask": ask, "bid": bid }));
            serde_json::json!({
                "title": title,
                "orgType": org_type,
                "currencies": currencies
            })
        })
        .collect();

    serde_json::json!({ "sourceId": "1", "date": date, "organizations": organizations }).to_string()
}
