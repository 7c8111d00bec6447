use crate::models::Organization;
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for quoting organizations
pub struct OrganizationRepository {
    pool: SqlitePool,
}

impl OrganizationRepository {
    /// Create a new OrganizationRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the organization unless `(name, org_type)` exists, then return
    /// the stored row
    pub async fn insert_if_absent(&self, name: &str, org_type: i64) -> SqlxResult<Organization> {
        sqlx::query(
            r#"
            INSERT INTO organizations (name, type)
            VALUES (?, ?)
            ON CONFLICT (name, type) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(org_type)
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, type
            FROM organizations
            WHERE name = ? AND type = ?
            "#,
        )
        .bind(name)
        .bind(org_type)
        .fetch_one(&self.pool)
        .await
    }

    /// Find an organization by its natural key
    pub async fn find_by_key(&self, name: &str, org_type: i64) -> SqlxResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, type
            FROM organizations
            WHERE name = ? AND type = ?
            "#,
        )
        .bind(name)
        .bind(org_type)
        .fetch_optional(&self.pool)
        .await
    }

    /// All organizations ordered by name
    pub async fn find_all(&self) -> SqlxResult<Vec<Organization>> {
        sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, type
            FROM organizations
            ORDER BY name ASC, type ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Count stored organizations
    pub async fn count(&self) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM organizations")
            .fetch_one(&self.pool)
            .await
    }
}
