use crate::config::FetchConfig;
use crate::error::{AppError, AppResult};
use crate::models::RemoteListing;
use reqwest::Client;
use tracing::debug;

/// HTTP client for the public cash-rate listing
pub struct RateFetcher {
    client: Client,
    api_url: String,
}

impl RateFetcher {
    pub fn new(config: &FetchConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Download and decode the current listing
    pub async fn fetch(&self) -> AppResult<RemoteListing> {
        debug!("Fetching rates from {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("{}: {}", self.api_url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "{} responded with {}",
                self.api_url,
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Fetch(format!("{}: {}", self.api_url, e)))?;

        Ok(serde_json::from_slice(&body)?)
    }
}
