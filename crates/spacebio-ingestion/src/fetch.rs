//! Page fetcher used by the loader's `fetch_content` option.

use std::time::Duration;

use tracing::warn;

use crate::error::{LoadError, Result};

const USER_AGENT: &str = "Mozilla/5.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed-delay retry: `max_attempts` tries in total, `delay` between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, delay: Duration::from_secs(5) }
    }
}

#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl PageFetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;
        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// GET `url` and return the body text. Non-2xx and transport errors are
    /// retried; the last failure is returned.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let attempts = self.policy.max_attempts.max(1);
        let mut last_error: Option<reqwest::Error> = None;

        for attempt in 1..=attempts {
            match self.try_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    if attempt < attempts {
                        warn!(
                            url,
                            attempt,
                            max_attempts = attempts,
                            delay_ms = self.policy.delay.as_millis() as u64,
                            error = %e,
                            "Page fetch failed, retrying"
                        );
                        tokio::time::sleep(self.policy.delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(LoadError::Fetch {
            url: url.to_string(),
            attempts,
            message: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    /// Like `fetch`, but gives up with an empty string.
    pub async fn fetch_or_empty(&self, url: &str) -> String {
        match self.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Page fetch gave up, storing empty content");
                String::new()
            }
        }
    }

    async fn try_once(&self, url: &str) -> reqwest::Result<String> {
        self.client.get(url).send().await?.error_for_status()?.text().await
    }
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
