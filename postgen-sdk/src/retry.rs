// ABOUTME: Retry logic with exponential backoff for handling transient failures
// ABOUTME: Implements retry mechanism for network errors, timeouts, and rate limits

use crate::constants::retry;
use crate::error::SdkError;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: retry::MAX_RETRIES,
            initial_delay: retry::INITIAL_DELAY,
            max_delay: retry::MAX_DELAY,
            backoff_multiplier: retry::BACKOFF_MULTIPLIER,
        }
    }
}

pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    verbose: bool,
    mut operation: F,
) -> Result<T, SdkError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SdkError>>,
{
    let mut delay = config.initial_delay;
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            if verbose {
                eprintln!(
                    "Retrying operation (attempt {}/{})",
                    attempt, config.max_retries
                );
            }
            sleep(delay).await;
            delay = std::cmp::min(
                Duration::from_millis(
                    (delay.as_millis() as f64 * config.backoff_multiplier) as u64,
                ),
                config.max_delay,
            );
        }

        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                if !error.is_retryable() || attempt == config.max_retries {
                    return Err(error);
                }

                if verbose {
                    eprintln!("Request failed (retryable): {}", error);
                }
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| SdkError::Network("Retry failed".to_string())))
}
