// Feed port for raw element-set text
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("source {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

#[async_trait]
pub trait ElementFeed: Send + Sync {
    /// Fetch one source's raw TLE text.
    async fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Raw payloads from one load pass over the configured sources.
#[derive(Debug, Default)]
pub struct FeedBatch {
    pub payloads: Vec<String>,
    pub failed_sources: usize,
}

/// Fetch every configured source, tolerating per-source failure. A source
/// that times out or errors is counted and skipped; the batch carries
/// whatever the remaining sources returned.
pub async fn load_sources(feed: &dyn ElementFeed, sources: &[String]) -> FeedBatch {
    let mut batch = FeedBatch::default();
    for url in sources {
        match feed.fetch(url).await {
            Ok(payload) => batch.payloads.push(payload),
            Err(e) => {
                tracing::warn!("element feed source failed: {}", e);
                batch.failed_sources += 1;
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyFeed;

    #[async_trait]
    impl ElementFeed for FlakyFeed {
        async fn fetch(&self, url: &str) -> Result<String, FeedError> {
            if url.contains("down") {
                Err(FeedError::Status {
                    url: url.to_string(),
                    status: 503,
                })
            } else {
                Ok(format!("payload from {}", url))
            }
        }
    }

    #[tokio::test]
    async fn test_per_source_failure_does_not_abort_the_batch() {
        let sources = vec![
            "http://feeds.test/a".to_string(),
            "http://feeds.test/down".to_string(),
            "http://feeds.test/b".to_string(),
        ];
        let batch = load_sources(&FlakyFeed, &sources).await;
        assert_eq!(batch.payloads.len(), 2);
        assert_eq!(batch.failed_sources, 1);
    }

    #[tokio::test]
    async fn test_empty_source_list_yields_empty_batch() {
        let batch = load_sources(&FlakyFeed, &[]).await;
        assert!(batch.payloads.is_empty());
        assert_eq!(batch.failed_sources, 0);
    }
}
