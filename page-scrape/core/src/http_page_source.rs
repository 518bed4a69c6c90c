// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Config, PageSource, ScrapeError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::warn;

/// Backoff for throttled (429) and server-error responses, and for
/// connect or timeout failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Exponential delay for the given retry, capped and jittered down by up to 25%
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponential = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(retry))
            .min(self.max_delay);
        exponential.mul_f64(1.0 - fastrand::f64() * 0.25)
    }
}

/// Fetches pages over HTTP from a single URL
pub struct HttpPageSource {
    client: Client,
    url: String,
    retry: RetryPolicy,
}

impl HttpPageSource {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        Self::new(
            config.page_url.clone(),
            config.request_timeout(),
            &config.user_agent,
            config.retry_policy(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self) -> Result<String, ScrapeError> {
        let mut retry = 0;
        loop {
            let response = match self.client.get(&self.url).send().await {
                Ok(response) => response,
                Err(e) if is_retryable_error(&e) && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for(retry);
                    warn!(
                        url = %self.url,
                        error = %e,
                        retry,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying page fetch"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let status = response.status();

            if status.as_u16() > 399 {
                if is_retryable(status) && retry < self.retry.max_retries {
                    let delay = self.retry.delay_for(retry);
                    warn!(
                        url = %self.url,
                        status = status.as_u16(),
                        retry,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying page fetch"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                    continue;
                }
                return Err(ScrapeError::HttpStatus(status.as_u16()));
            }

            return Ok(response.text().await?);
        }
    }
}
