//! Domain models for the rate history store.
//!
//! Table rows (`RateDate`, `Organization`, `Quote`), the join row used to
//! rebuild snapshots, and the listing shapes exchanged with callers.

pub mod listing;
pub mod organization;
pub mod quote;
pub mod rate_date;

// Re-export all models for convenient access
pub use listing::{
    CurrencyRate, Direction, NavigationRequest, OrganizationListing, RemoteListing, Snapshot,
    TRACKED_CURRENCY,
};
pub use organization::{OrgKind, Organization};
pub use quote::{Quote, QuoteRow};
pub use rate_date::{parse_listing_date, RateDate};
