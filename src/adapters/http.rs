use crate::core::ConfigProvider;
use crate::domain::model::FetchedPage;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Thin wrapper over a reqwest client that hands out one immutable
/// [`FetchedPage`] per request.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Non-2xx responses are errors; callers decide whether that is fatal.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "cs-CZ,cs;q=0.9")
            .send()
            .await?
            .error_for_status()?;

        let final_url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}
