use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::{error::LLMError, LLMProvider};

use super::config::ResilienceConfig;

/// Resilient wrapper that retries transient failures using exponential backoff.
pub struct ResilientLLM {
    pub(super) inner: Box<dyn LLMProvider>,
    pub(super) cfg: ResilienceConfig,
}

impl ResilientLLM {
    /// Creates a new resilient wrapper around an existing provider.
    pub fn new(inner: Box<dyn LLMProvider>, cfg: ResilienceConfig) -> Self {
        Self { inner, cfg }
    }

    pub(super) async fn retry<F, Fut, T>(&self, mut op: F) -> Result<T, LLMError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LLMError>>,
    {
        let max_attempts = self.cfg.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 0..max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !Self::is_retryable(&err) => return Err(err),
                Err(err) => {
                    log::warn!("attempt {}/{max_attempts} failed: {err}", attempt + 1);
                    last_err = Some(err);
                    if attempt + 1 < max_attempts {
                        sleep(Duration::from_millis(self.cfg.delay_ms(attempt))).await;
                    }
                }
            }
        }

        match last_err {
            Some(err) if max_attempts == 1 => Err(err),
            last => Err(LLMError::RetryExceeded {
                attempts: max_attempts,
                last_error: last.map(|e| e.to_string()).unwrap_or_default(),
            }),
        }
    }

    fn is_retryable(err: &LLMError) -> bool {
        match err {
            LLMError::HttpError(_) => true,
            LLMError::ProviderError(_) => true,
            LLMError::ResponseFormatError { .. } => true,
            LLMError::JsonError(_) => true,
            LLMError::Generic(_) => true,
            LLMError::RetryExceeded { .. } => false,
            LLMError::AuthError(_) => false,
            LLMError::InvalidRequest(_) => false,
        }
    }
}

impl LLMProvider for ResilientLLM {}
