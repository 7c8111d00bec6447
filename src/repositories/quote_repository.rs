use crate::models::{Quote, QuoteRow};
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for ask/bid observations
#[derive(Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    /// Create a new QuoteRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new quote
    pub async fn create(
        &self,
        ask: f64,
        bid: f64,
        organization_id: i64,
        date_id: i64,
    ) -> SqlxResult<Quote> {
        sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (ask, bid, organization_id, date_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, ask, bid, organization_id, date_id
            "#,
        )
        .bind(ask)
        .bind(bid)
        .bind(organization_id)
        .bind(date_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Quotes of one date joined with organization and date, in insertion order
    pub async fn find_rows_by_date(&self, date_id: i64) -> SqlxResult<Vec<QuoteRow>> {
        sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT
                quotes.ask,
                quotes.bid,
                organizations.name,
                organizations.type AS org_type,
                dates.timestamp
            FROM quotes
            JOIN dates ON quotes.date_id = dates.id
            JOIN organizations ON quotes.organization_id = organizations.id
            WHERE dates.id = ?
            ORDER BY quotes.id ASC
            "#,
        )
        .bind(date_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Count quotes stored for one date
    pub async fn count_by_date(&self, date_id: i64) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes WHERE date_id = ?")
            .bind(date_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Count all stored quotes
    pub async fn count(&self) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await
    }
}
