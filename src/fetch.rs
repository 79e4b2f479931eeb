//! HTTP fetching with retry and linear backoff.
//!
//! Each detail worker constructs its own [`Fetcher`] and keeps it for the
//! duration of its task, so connection reuse happens per worker without any
//! shared state between concurrent tasks. That exclusivity is a performance
//! choice, not a correctness requirement.
//!
//! # Retry Strategy
//!
//! - Up to 3 attempts per URL
//! - Any non-2xx status or transport error fails the attempt
//! - Linear backoff between attempts: 0.6 s, 1.2 s, ...
//! - Exhaustion surfaces as [`ScrapeError::Transport`] with the last cause

use crate::error::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
/// Attempts per URL before giving up.
pub const MAX_RETRIES: u32 = 3;
/// Base delay multiplied by the attempt number between retries.
pub const BACKOFF_BASE: Duration = Duration::from_millis(600);
/// Identifying user agent sent on every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ADUMParallel/1.0)";

/// An HTTP client with the portal's retry policy baked in.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    backoff_base: Duration,
}

impl Fetcher {
    /// Build a fetcher with the default policy (20 s timeout, 3 attempts,
    /// 0.6 s backoff base).
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_policy(DEFAULT_TIMEOUT, MAX_RETRIES, BACKOFF_BASE)
    }

    /// Build a fetcher with an explicit policy.
    pub fn with_policy(
        timeout: Duration,
        max_retries: u32,
        backoff_base: Duration,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base,
        })
    }

    /// GET a URL and return its body as text.
    ///
    /// Retries transparently; the returned error carries the attempt count
    /// and the last underlying cause.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let mut last_err: Option<reqwest::Error> = None;

        for attempt in 1..=self.max_retries {
            let result = async {
                let resp = self.client.get(url).send().await?;
                let resp = resp.error_for_status()?;
                resp.text().await
            }
            .await;

            match result {
                Ok(body) => {
                    debug!(%url, attempt, bytes = body.len(), "GET succeeded");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(
                        %url,
                        attempt,
                        max = self.max_retries,
                        error = %e,
                        "GET failed"
                    );
                    last_err = Some(e);
                    if attempt < self.max_retries {
                        sleep(self.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        // max_retries >= 1, so last_err is always set by the loop.
        Err(ScrapeError::Transport {
            attempts: self.max_retries,
            source: last_err.ok_or_else(|| {
                ScrapeError::Config("max_retries must be at least 1".to_string())
            })?,
        })
    }

    /// Delay before the retry following `attempt` (1-based): linear in the
    /// attempt number.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }
}
