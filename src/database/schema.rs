//! Table definitions for the rate history store.
//!
//! Creation is idempotent; `quotes` references the other two tables and is
//! created last.

use super::pool::DatabaseError;
use sqlx::SqlitePool;
use tracing::{error, info};

const CREATE_DATES: &str = r#"
    CREATE TABLE IF NOT EXISTS dates (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp INTEGER NOT NULL
    )
"#;

const CREATE_DATES_TIMESTAMP_INDEX: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_dates_timestamp ON dates (timestamp)
"#;

const CREATE_ORGANIZATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS organizations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type INTEGER NOT NULL
    )
"#;

const CREATE_ORGANIZATIONS_KEY_INDEX: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_organizations_name_type ON organizations (name, type)
"#;

const CREATE_QUOTES: &str = r#"
    CREATE TABLE IF NOT EXISTS quotes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ask REAL NOT NULL,
        bid REAL NOT NULL,
        organization_id INTEGER NOT NULL,
        date_id INTEGER NOT NULL,
        FOREIGN KEY (organization_id) REFERENCES organizations (id),
        FOREIGN KEY (date_id) REFERENCES dates (id)
    )
"#;

const CREATE_QUOTES_DATE_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_quotes_date_id ON quotes (date_id)
"#;

/// Tables in creation order
pub const TABLES: [&str; 3] = ["dates", "organizations", "quotes"];

async fn create(pool: &SqlitePool, table: &'static str, sql: &str) -> Result<(), DatabaseError> {
    sqlx::query(sql).execute(pool).await.map_err(|source| {
        error!("Failed to create {}: {}", table, source);
        DatabaseError::Schema { table, source }
    })?;
    Ok(())
}

/// Create the three tables and their natural-key indexes if absent
pub async fn initialize(pool: &SqlitePool) -> Result<(), DatabaseError> {
    // dates and organizations have no dependencies on each other
    tokio::try_join!(
        async {
            create(pool, "dates", CREATE_DATES).await?;
            create(pool, "dates", CREATE_DATES_TIMESTAMP_INDEX).await
        },
        async {
            create(pool, "organizations", CREATE_ORGANIZATIONS).await?;
            create(pool, "organizations", CREATE_ORGANIZATIONS_KEY_INDEX).await
        },
    )?;

    create(pool, "quotes", CREATE_QUOTES).await?;
    create(pool, "quotes", CREATE_QUOTES_DATE_INDEX).await?;

    info!("Schema ready: {}", TABLES.join(", "));
    Ok(())
}
