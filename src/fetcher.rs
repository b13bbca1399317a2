use crate::config::{CatalogConfig, RetryConfig};
use crate::error::CatalogError;
use crate::interpret::{interpret_body, FetchOutcome};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

/// Where recipe bodies come from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Human readable location, shown in the catalog header
    fn endpoint(&self) -> &str;

    /// Perform one request and return the body of a successful response
    async fn fetch_body(&self) -> Result<String, CatalogError>;
}

/// Plain HTTP GET against a fixed URL
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RecipeSource for HttpSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn fetch_body(&self) -> Result<String, CatalogError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Delay before the attempt following `attempt_index` (zero based): 1x, 2x, 4x ...
pub fn backoff_delay(attempt_index: u32, base_delay_ms: u64) -> Duration {
    let factor = 2u64.saturating_pow(attempt_index);
    Duration::from_millis(base_delay_ms.saturating_mul(factor))
}

/// Loads recipes from a [`RecipeSource`], retrying failed requests
pub struct RecipeFetcher {
    source: Box<dyn RecipeSource>,
    retry: RetryConfig,
}

impl RecipeFetcher {
    pub fn new(source: Box<dyn RecipeSource>, retry: RetryConfig) -> Self {
        Self { source, retry }
    }

    /// HTTP fetcher built from configuration
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let source = HttpSource::new(&config.endpoint, config.request_timeout())?;
        Ok(Self::new(Box::new(source), config.retry.clone()))
    }

    pub fn endpoint(&self) -> &str {
        self.source.endpoint()
    }

    /// Fetch and interpret the recipes.
    ///
    /// Transport failures and non-success statuses are retried with
    /// exponential backoff. A body that is not JSON fails without a retry.
    pub async fn fetch_recipes(&self) -> Result<FetchOutcome, CatalogError> {
        let body = self.fetch_body_with_retry().await?;
        let outcome = interpret_body(&body)?;
        info!(
            "Loaded {} recipes from {}",
            outcome.recipes.len(),
            self.endpoint()
        );
        Ok(outcome)
    }

    async fn fetch_body_with_retry(&self) -> Result<String, CatalogError> {
        let attempts = self.retry.attempts.max(1);
        let mut last_error = String::new();

        for attempt in 0..attempts {
            debug!(
                "Requesting {} (attempt {}/{})",
                self.endpoint(),
                attempt + 1,
                attempts
            );

            match self.source.fetch_body().await {
                Ok(body) => return Ok(body),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        self.endpoint(),
                        attempt + 1,
                        attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt + 1 < attempts {
                let delay = backoff_delay(attempt, self.retry.base_delay_ms);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(CatalogError::Exhausted {
            attempts,
            last: last_error,
        })
    }
}
