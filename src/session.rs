//! Interactive browsing of the stored history.
//!
//! A session remembers which snapshot is on screen and whether a warning is
//! showing; a warning sends the next navigation back to the latest snapshot.

use crate::models::{parse_listing_date, Direction, NavigationRequest, Snapshot};
use crate::presenter::{render_snapshot, Notice};
use crate::services::{listing_to_snapshot, Navigator, RateFetcher, SnapshotService, SubmitOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Commands accepted on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Latest,
    Previous,
    Next,
    Refresh,
    Help,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_lowercase().as_str() {
            "latest" | "l" => Ok(Command::Latest),
            "prev" | "previous" | "p" => Ok(Command::Previous),
            "next" | "n" => Ok(Command::Next),
            "refresh" | "r" => Ok(Command::Refresh),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {} (try `help`)", other)),
        }
    }
}

pub const HELP: &str = "Commands: latest (l), prev (p), next (n), refresh (r), help (h), quit (q)\n";

pub struct Session {
    navigator: Arc<Navigator>,
    snapshot_service: Arc<SnapshotService>,
    fetcher: Option<Arc<RateFetcher>>,
    displayed: Option<i64>,
    warning: bool,
}

impl Session {
    pub fn new(
        navigator: Arc<Navigator>,
        snapshot_service: Arc<SnapshotService>,
        fetcher: Option<Arc<RateFetcher>>,
    ) -> Self {
        Self {
            navigator,
            snapshot_service,
            fetcher,
            displayed: None,
            warning: false,
        }
    }

    /// Timestamp of the snapshot on screen
    pub fn displayed(&self) -> Option<i64> {
        self.displayed
    }

    pub fn warning(&self) -> bool {
        self.warning
    }

    /// Run a command and return the text to print
    pub async fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Latest => self.navigate(NavigationRequest::latest()).await,
            Command::Previous => self.step(Direction::Previous).await,
            Command::Next => self.step(Direction::Next).await,
            Command::Refresh => self.refresh().await,
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }

    async fn step(&mut self, direction: Direction) -> String {
        let request = NavigationRequest {
            date: self.displayed,
            change_date_to: Some(direction),
            warning: self.warning,
        };
        self.navigate(request).await
    }

    async fn navigate(&mut self, request: NavigationRequest) -> String {
        match self.navigator.fetch_snapshot(request).await {
            Some(snapshot) => self.show(&snapshot),
            None => self.notice(Notice::NoData),
        }
    }

    /// Fetch the remote listing, store it, and show what was fetched
    async fn refresh(&mut self) -> String {
        let Some(fetcher) = self.fetcher.clone() else {
            return self.notice(Notice::NoConnection);
        };

        let listing = match fetcher.fetch().await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Refresh failed: {}", e);
                return self.notice(Notice::NoConnection);
            }
        };

        let timestamp = match parse_listing_date(&listing.date) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                warn!("Refresh returned a bad date: {}", e);
                return self.notice(Notice::NoConnection);
            }
        };

        let snapshot = listing_to_snapshot(timestamp, &listing.organizations);
        let outcome = self
            .snapshot_service
            .submit_snapshot(timestamp, listing.organizations)
            .await;
        info!("Refresh submitted: {:?}", outcome);

        if outcome == SubmitOutcome::NoTrackedQuotes || snapshot.organizations.is_empty() {
            return self.notice(Notice::NoTrackedQuotes);
        }
        self.show(&snapshot)
    }

    fn show(&mut self, snapshot: &Snapshot) -> String {
        self.displayed = Some(snapshot.date);
        self.warning = false;
        render_snapshot(snapshot)
    }

    fn notice(&mut self, notice: Notice) -> String {
        self.warning = true;
        format!("{}\n", notice.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("p").unwrap(), Command::Previous);
        assert_eq!(Command::parse(" NEXT ").unwrap(), Command::Next);
        assert_eq!(Command::parse("latest").unwrap(), Command::Latest);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
        assert!(Command::parse("jump").is_err());
    }
}
