//! Shapes exchanged with the fetcher and the presenter.
//!
//! Inbound and outbound listings share [`OrganizationListing`]; the outbound
//! [`Snapshot`] only ever carries the tracked currency.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// The single currency code the store keeps
pub const TRACKED_CURRENCY: &str = "USD";

/// Ask/bid pair for one currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    #[serde(deserialize_with = "rate_value")]
    pub ask: f64,
    #[serde(deserialize_with = "rate_value")]
    pub bid: f64,
}

/// The public endpoint sends rates as decimal strings ("27.5000")
fn rate_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid rate: {}", text))),
    }
}

/// One organization and the currencies it quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationListing {
    pub title: String,
    pub org_type: i64,
    #[serde(default, deserialize_with = "readable_rates")]
    pub currencies: BTreeMap<String, CurrencyRate>,
}

/// Currency map that drops entries whose rates cannot be read, so a broken
/// quote for one currency does not reject the rest of the listing
fn readable_rates<'de, D>(deserializer: D) -> Result<BTreeMap<String, CurrencyRate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(code, value)| match CurrencyRate::deserialize(value) {
            Ok(rate) => Some((code, rate)),
            Err(e) => {
                debug!("Skipping unreadable {} rate: {}", code, e);
                None
            }
        })
        .collect())
}

impl OrganizationListing {
    /// Listing entry quoting only the tracked currency
    pub fn tracked(title: impl Into<String>, org_type: i64, ask: f64, bid: f64) -> Self {
        let mut currencies = BTreeMap::new();
        currencies.insert(TRACKED_CURRENCY.to_string(), CurrencyRate { ask, bid });
        Self {
            title: title.into(),
            org_type,
            currencies,
        }
    }

    /// Rate for the tracked currency, if quoted
    pub fn tracked_rate(&self) -> Option<&CurrencyRate> {
        self.currencies.get(TRACKED_CURRENCY)
    }
}

/// Listing as delivered by the remote endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteListing {
    /// ISO-8601 observation time
    pub date: String,
    #[serde(default)]
    pub organizations: Vec<OrganizationListing>,
}

/// Stored listing for one date, restricted to the tracked currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Epoch milliseconds
    pub date: i64,
    pub organizations: Vec<OrganizationListing>,
}

/// Relative navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Date id step for this direction
    pub fn offset(&self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Request for a stored snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    /// Timestamp of the snapshot currently displayed
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub change_date_to: Option<Direction>,
    /// Set when the caller has nothing trustworthy on screen
    #[serde(default)]
    pub warning: bool,
}

impl NavigationRequest {
    pub fn latest() -> Self {
        Self {
            warning: true,
            ..Self::default()
        }
    }

    pub fn previous(date: i64) -> Self {
        Self::relative(date, Direction::Previous)
    }

    pub fn next(date: i64) -> Self {
        Self::relative(date, Direction::Next)
    }

    pub fn relative(date: i64, direction: Direction) -> Self {
        Self {
            date: Some(date),
            change_date_to: Some(direction),
            warning: false,
        }
    }

    /// Reference date and direction, unless the request asks for the latest
    pub fn relative_target(&self) -> Option<(i64, Direction)> {
        if self.warning {
            return None;
        }
        self.date.zip(self.change_date_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_accepts_string_rates() {
        let listing: RemoteListing = serde_json::from_value(json!({
            "date": "2024-01-01T00:00:00Z",
            "organizations": [{
                "id": "7oiylpmiow8iy1smadi",
                "title": "BankA",
                "orgType": 1,
                "currencies": {
                    "USD": { "ask": "27.5000", "bid": "27.0000" },
                    "EUR": { "ask": 30.1, "bid": 29.9 }
                }
            }]
        }))
        .unwrap();

        let org = &listing.organizations[0];
        assert_eq!(org.org_type, 1);
        assert_eq!(org.tracked_rate(), Some(&CurrencyRate { ask: 27.5, bid: 27.0 }));
        assert_eq!(org.currencies.len(), 2);
    }

    #[test]
    fn test_listing_rejects_non_numeric_rate() {
        let result: Result<CurrencyRate, _> =
            serde_json::from_value(json!({ "ask": "n/a", "bid": "27.0" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_broken_rate_for_other_currency_keeps_usd() {
        let listing: RemoteListing = serde_json::from_value(json!({
            "date": "2024-01-01T00:00:00Z",
            "organizations": [
                {
                    "title": "BankA",
                    "orgType": 1,
                    "currencies": {
                        "RUB": { "ask": "", "bid": "0.4100" },
                        "EUR": { "ask": null, "bid": null },
                        "USD": { "ask": "27.5000", "bid": "27.0000" }
                    }
                },
                { "title": "Kiosk", "orgType": 2, "currencies": null }
            ]
        }))
        .unwrap();

        let bank = &listing.organizations[0];
        assert_eq!(bank.tracked_rate(), Some(&CurrencyRate { ask: 27.5, bid: 27.0 }));
        assert_eq!(bank.currencies.len(), 1);
        assert!(listing.organizations[1].currencies.is_empty());
    }

    #[test]
    fn test_unreadable_usd_rate_counts_as_not_quoted() {
        let org: OrganizationListing = serde_json::from_value(json!({
            "title": "Kiosk",
            "orgType": 2,
            "currencies": { "USD": { "ask": "n/a", "bid": "27.0" } }
        }))
        .unwrap();

        assert_eq!(org.tracked_rate(), None);
    }

    #[test]
    fn test_snapshot_serializes_to_listing_shape() {
        let snapshot = Snapshot {
            date: 1_704_067_200_000,
            organizations: vec![OrganizationListing::tracked("BankA", 1, 27.5, 27.0)],
        };

        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "date": 1_704_067_200_000i64,
                "organizations": [{
                    "title": "BankA",
                    "orgType": 1,
                    "currencies": { "USD": { "ask": 27.5, "bid": 27.0 } }
                }]
            })
        );
    }

    #[test]
    fn test_navigation_request_modes() {
        let request: NavigationRequest = serde_json::from_value(json!({
            "date": 1_704_067_200_000i64,
            "changeDateTo": "previous",
            "warning": false
        }))
        .unwrap();
        assert_eq!(
            request.relative_target(),
            Some((1_704_067_200_000, Direction::Previous))
        );

        let warned = NavigationRequest {
            warning: true,
            ..request
        };
        assert_eq!(warned.relative_target(), None);
        assert_eq!(NavigationRequest::default().relative_target(), None);
    }
}
