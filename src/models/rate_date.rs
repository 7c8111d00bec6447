use crate::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Point in time a listing was observed, unique by `timestamp` (epoch ms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RateDate {
    pub id: i64,
    pub timestamp: i64,
}

/// Convert an ISO-8601 listing date to epoch milliseconds.
///
/// Dates without an offset are read as UTC.
pub fn parse_listing_date(date: &str) -> AppResult<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Ok(parsed.timestamp_millis());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))
}
