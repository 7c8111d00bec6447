use crate::models::RateDate;
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for observation dates
pub struct DateRepository {
    pool: SqlitePool,
}

impl DateRepository {
    /// Create a new DateRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the date unless one with the same timestamp exists, then return
    /// the stored row. An existing row is never modified.
    pub async fn insert_if_absent(&self, timestamp: i64) -> SqlxResult<RateDate> {
        sqlx::query(
            r#"
            INSERT INTO dates (timestamp)
            VALUES (?)
            ON CONFLICT (timestamp) DO NOTHING
            "#,
        )
        .bind(timestamp)
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            WHERE timestamp = ?
            "#,
        )
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a date by id
    pub async fn find_by_id(&self, id: i64) -> SqlxResult<Option<RateDate>> {
        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a date by its timestamp
    pub async fn find_by_timestamp(&self, timestamp: i64) -> SqlxResult<Option<RateDate>> {
        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            WHERE timestamp = ?
            "#,
        )
        .bind(timestamp)
        .fetch_optional(&self.pool)
        .await
    }

    /// Date with the greatest timestamp
    pub async fn find_latest(&self) -> SqlxResult<Option<RateDate>> {
        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }

    /// Greatest stored timestamp, `None` on an empty store
    pub async fn max_timestamp(&self) -> SqlxResult<Option<i64>> {
        sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(timestamp) FROM dates")
            .fetch_one(&self.pool)
            .await
    }

    /// Closest date strictly before `timestamp`
    pub async fn find_before(&self, timestamp: i64) -> SqlxResult<Option<RateDate>> {
        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            WHERE timestamp < ?
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(timestamp)
        .fetch_optional(&self.pool)
        .await
    }

    /// Closest date strictly after `timestamp`
    pub async fn find_after(&self, timestamp: i64) -> SqlxResult<Option<RateDate>> {
        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            WHERE timestamp > ?
            ORDER BY timestamp ASC
            LIMIT 1
            "#,
        )
        .bind(timestamp)
        .fetch_optional(&self.pool)
        .await
    }

    /// All dates in insertion order
    pub async fn find_all(&self) -> SqlxResult<Vec<RateDate>> {
        sqlx::query_as::<_, RateDate>(
            r#"
            SELECT id, timestamp
            FROM dates
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Count stored dates
    pub async fn count(&self) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dates")
            .fetch_one(&self.pool)
            .await
    }
}
