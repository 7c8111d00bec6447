//! Plain-text rendering of snapshots for the terminal.

use crate::models::{OrgKind, Snapshot};
use chrono::{TimeZone, Utc};
use std::fmt::Write;

/// Warning line shown instead of (or above) a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoData,
    NoConnection,
    NoTrackedQuotes,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoData => "The store has no data for that date.",
            Notice::NoConnection => {
                "The rate source is unreachable. Browse previously saved listings."
            }
            Notice::NoTrackedQuotes => {
                "The rate source sent no USD quotes. Browse previously saved listings."
            }
        }
    }
}

/// Format a rate the way the listing is displayed
pub fn format_rate(value: f64) -> String {
    format!("{:.3}", value)
}

/// Format an epoch-millisecond timestamp as a UTC date line
pub fn format_date(timestamp: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp).single() {
        Some(date) => date.format("%B %-d %Y, %-H:%M UTC").to_string(),
        None => format!("@{}", timestamp),
    }
}

/// Render a snapshot as a table
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let width = snapshot
        .organizations
        .iter()
        .map(|org| org.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Organization".len());

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_date(snapshot.date));
    let _ = writeln!(
        out,
        "{:<width$}  {:<9}  {:>8}  {:>8}",
        "Organization",
        "Type",
        "Ask",
        "Bid",
        width = width
    );

    for org in &snapshot.organizations {
        let Some(rate) = org.tracked_rate() else {
            continue;
        };
        let _ = writeln!(
            out,
            "{:<width$}  {:<9}  {:>8}  {:>8}",
            org.title,
            OrgKind::from_code(org.org_type).as_str(),
            format_rate(rate.ask),
            format_rate(rate.bid),
            width = width
        );
    }

    out
}

/// Render a navigation result, falling back to the no-data notice
pub fn render(snapshot: Option<&Snapshot>) -> String {
    match snapshot {
        Some(snapshot) => render_snapshot(snapshot),
        None => format!("{}\n", Notice::NoData.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrganizationListing;

    #[test]
    fn test_format_rate_three_decimals() {
        assert_eq!(format_rate(27.5), "27.500");
        assert_eq!(format_rate(27.12345), "27.123");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_704_067_200_000), "January 1 2024, 0:00 UTC");
    }

    #[test]
    fn test_render_snapshot() {
        let snapshot = Snapshot {
            date: 1_704_067_200_000,
            organizations: vec![
                OrganizationListing::tracked("BankA", 1, 27.5, 27.0),
                OrganizationListing::tracked("Kiosk", 2, 27.75, 27.25),
            ],
        };

        let text = render_snapshot(&snapshot);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "January 1 2024, 0:00 UTC");
        assert!(lines[2].starts_with("BankA"));
        assert!(lines[2].contains("bank"));
        assert!(lines[2].contains("27.500"));
        assert!(lines[3].contains("exchanger"));
        assert!(lines[3].ends_with("27.250"));
    }

    #[test]
    fn test_render_no_data() {
        assert_eq!(render(None), "The store has no data for that date.\n");
    }
}
