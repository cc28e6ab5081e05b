// HTTP element feed - fetches raw TLE text from configured sources
use std::time::Duration;

use async_trait::async_trait;

use crate::application::element_feed::{ElementFeed, FeedError};

#[derive(Debug, Clone)]
pub struct HttpElementFeed {
    client: reqwest::Client,
}

impl HttpElementFeed {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("orbital-telemetry/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ElementFeed for HttpElementFeed {
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FeedError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
