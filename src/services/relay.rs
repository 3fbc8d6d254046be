//! Report relay — forwards accepted reports to the hazard authority.
//!
//! DESIGN
//! ======
//! The intake flow talks to `dyn ReportRelay` so the transport is
//! swappable: `HttpRelay` posts to a configured authority endpoint with
//! a request timeout and bounded retry-with-backoff, while `AcceptRelay`
//! accepts in-process when no authority URL is configured. Either way
//! the caller sees the same contract: `Ok` means the report was taken,
//! `Err` carries a user-presentable reason.

use std::time::Duration;

use crate::state::HazardReport;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Authority answered with a non-2xx status.
    #[error("API error: {status}")]
    Status { status: u16 },
    /// Request never produced a response (DNS, connect, timeout).
    #[error("authority unreachable: {0}")]
    Transport(String),
}

#[async_trait::async_trait]
pub trait ReportRelay: Send + Sync {
    /// Hand a report to the authority. Success consumes the report;
    /// failure leaves the caller free to retry with the same payload.
    async fn submit(&self, report: &HazardReport) -> Result<(), RelayError>;
}

// =============================================================================
// IN-PROCESS RELAY
// =============================================================================

/// Accepts every report locally. Used when no authority URL is
/// configured, and by tests.
pub struct AcceptRelay;

#[async_trait::async_trait]
impl ReportRelay for AcceptRelay {
    async fn submit(&self, _report: &HazardReport) -> Result<(), RelayError> {
        Ok(())
    }
}

// =============================================================================
// HTTP RELAY
// =============================================================================

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_RETRY_BASE_MS: u64 = 200;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Relay tuning, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub authority_url: String,
    pub timeout: Duration,
    /// Retry attempts after the first try, on transient failures only.
    pub retries: u32,
    pub retry_base_ms: u64,
}

impl RelayConfig {
    /// Load from `AUTHORITY_URL`, `RELAY_TIMEOUT_SECS`, `RELAY_RETRIES`,
    /// `RELAY_RETRY_BASE_MS`. Returns `None` if `AUTHORITY_URL` is unset
    /// (reports are then accepted in-process).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let authority_url = std::env::var("AUTHORITY_URL").ok()?;
        Some(Self {
            authority_url,
            timeout: Duration::from_secs(env_parse("RELAY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            retries: env_parse("RELAY_RETRIES", DEFAULT_RETRIES),
            retry_base_ms: env_parse("RELAY_RETRY_BASE_MS", DEFAULT_RETRY_BASE_MS),
        })
    }
}

/// Exponential backoff for retry `attempt` (1-based).
pub(crate) fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(1_u64 << (attempt - 1).min(16)))
}

/// POSTs reports as JSON to the authority endpoint.
pub struct HttpRelay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl HttpRelay {
    /// Build the relay with its own HTTP client and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client fails to build.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait::async_trait]
impl ReportRelay for HttpRelay {
    async fn submit(&self, report: &HazardReport) -> Result<(), RelayError> {
        let mut attempt: u32 = 0;
        loop {
            let result = self
                .client
                .post(&self.config.authority_url)
                .json(report)
                .send()
                .await;

            let error = match result {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => {
                    let status = resp.status();
                    // Client errors won't heal on retry.
                    if !status.is_server_error() {
                        return Err(RelayError::Status { status: status.as_u16() });
                    }
                    RelayError::Status { status: status.as_u16() }
                }
                Err(e) => RelayError::Transport(e.to_string()),
            };

            attempt += 1;
            if attempt > self.config.retries {
                return Err(error);
            }
            let delay = backoff_delay(self.config.retry_base_ms, attempt);
            tracing::warn!(report_id = %report.id, %error, attempt, delay_ms = delay.as_millis() as u64, "relay attempt failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
