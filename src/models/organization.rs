use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Kind of organization quoting the rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgKind {
    Bank,
    Exchanger,
    Unknown,
}

impl OrgKind {
    /// Convert from the listing's type code
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => OrgKind::Bank,
            2 => OrgKind::Exchanger,
            _ => OrgKind::Unknown,
        }
    }

    /// Label used when presenting a snapshot
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgKind::Bank => "bank",
            OrgKind::Exchanger => "exchanger",
            OrgKind::Unknown => "unknown",
        }
    }
}

/// Organization row, unique by `(name, org_type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub org_type: i64,
}
