use crate::models::{OrganizationListing, QuoteRow, Snapshot, TRACKED_CURRENCY};

/// Keep only organizations quoting the tracked currency
pub fn filter_tracked_currency(organizations: Vec<OrganizationListing>) -> Vec<OrganizationListing> {
    organizations
        .into_iter()
        .filter(|org| org.currencies.contains_key(TRACKED_CURRENCY))
        .collect()
}

/// Fetched listing reduced to the snapshot shape: tracked quoters only,
/// each carrying only the tracked currency
pub fn listing_to_snapshot(timestamp: i64, organizations: &[OrganizationListing]) -> Snapshot {
    let organizations = organizations
        .iter()
        .filter_map(|org| {
            let rate = org.tracked_rate()?;
            Some(OrganizationListing::tracked(
                org.title.clone(),
                org.org_type,
                rate.ask,
                rate.bid,
            ))
        })
        .collect();

    Snapshot {
        date: timestamp,
        organizations,
    }
}

/// Rebuild the listing shape from the join rows of a single date.
///
/// Returns `None` for an empty row set.
pub fn rows_to_snapshot(rows: &[QuoteRow]) -> Option<Snapshot> {
    let first = rows.first()?;

    let organizations = rows
        .iter()
        .map(|row| OrganizationListing::tracked(row.name.clone(), row.org_type, row.ask, row.bid))
        .collect();

    Some(Snapshot {
        date: first.timestamp,
        organizations,
    })
}
