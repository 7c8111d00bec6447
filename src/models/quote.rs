use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One organization's ask/bid observed at one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: i64,
    pub ask: f64,
    pub bid: f64,
    pub organization_id: i64,
    pub date_id: i64,
}

/// Quote joined with its organization and date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuoteRow {
    pub ask: f64,
    pub bid: f64,
    pub name: String,
    pub org_type: i64,
    pub timestamp: i64,
}
