//! Model Gateway — the single point of entry for all model calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All model interactions MUST go through this module.
//!
//! The gateway owns retry and fallback policy over a narrow `TextModel`
//! transport. Retries apply only to transient failures (rate limit /
//! overload); a bad model identifier advances to the next entry in the
//! ordered fallback list without any backoff delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ModelConfig;

pub mod gemini;

use self::gemini::GeminiClient;

/// Attempts per model identifier, including the first call.
const MAX_ATTEMPTS: u32 = 3;
/// Cap on any single backoff wait, hint or not.
const MAX_BACKOFF_SECS: f64 = 10.0;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Rate limited or overloaded. `retry_after` carries the model-suggested
    /// wait in seconds when the error body included one.
    #[error("Model overloaded: {message}")]
    Transient {
        message: String,
        retry_after: Option<f64>,
    },

    /// Bad model identifier. Never retried against the same identifier.
    #[error("Model '{model}' not found")]
    NotFound { model: String },

    /// Missing or unusable credentials.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Anything else. Returned immediately without retry.
    #[error("Model call failed: {0}")]
    Fatal(String),
}

/// One generation attempt against one model identifier. No retry at this
/// layer; the gateway owns retry and fallback policy.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(
        &self,
        model_id: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, GatewayError>;
}

/// The single model gateway used by all services.
#[derive(Clone)]
pub struct ModelGateway {
    transport: Arc<dyn TextModel>,
    models: Vec<String>,
}

impl ModelGateway {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self::with_transport(
            Arc::new(GeminiClient::new(config.api_key.clone())),
            config.models.clone(),
        )
    }

    pub fn with_transport(transport: Arc<dyn TextModel>, models: Vec<String>) -> Self {
        Self { transport, models }
    }

    /// Calls one model identifier with bounded retry on transient failures.
    ///
    /// The wait before each retry is the model-suggested hint when present,
    /// otherwise exponential (1s, 2s, 4s), capped at `MAX_BACKOFF_SECS`.
    /// `NotFound`, `Configuration`, and `Fatal` are returned immediately.
    pub async fn generate(
        &self,
        model_id: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let mut last_error: Option<GatewayError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            match self.transport.generate(model_id, system, prompt).await {
                Ok(text) => {
                    debug!("model {model_id} succeeded on attempt {}", attempt + 1);
                    return Ok(text);
                }
                Err(GatewayError::Transient {
                    message,
                    retry_after,
                }) => {
                    warn!(
                        "model {model_id} attempt {}/{MAX_ATTEMPTS} transient failure: {message}",
                        attempt + 1
                    );
                    if attempt + 1 < MAX_ATTEMPTS {
                        tokio::time::sleep(backoff_delay(attempt, retry_after)).await;
                    }
                    last_error = Some(GatewayError::Transient {
                        message,
                        retry_after,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        Err(last_error.unwrap_or(GatewayError::Transient {
            message: format!("retries exhausted after {MAX_ATTEMPTS} attempts"),
            retry_after: None,
        }))
    }

    /// Tries each model identifier in order. A `NotFound` failure advances to
    /// the next identifier with no backoff delay; any other failure is
    /// surfaced as-is.
    pub async fn generate_with_fallback(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        if self.models.is_empty() {
            return Err(GatewayError::Configuration(
                "No model identifiers configured".to_string(),
            ));
        }

        for model_id in &self.models {
            match self.generate(model_id, system, prompt).await {
                Ok(text) => return Ok(text),
                Err(GatewayError::NotFound { model }) => {
                    warn!("model '{model}' not found, advancing to next fallback");
                }
                Err(other) => return Err(other),
            }
        }

        Err(GatewayError::Fatal(format!(
            "No model succeeded; tried: {}",
            self.models.join(", ")
        )))
    }
}

/// Wait before retry `attempt + 1`. Hint wins over the exponential default;
/// both are capped.
fn backoff_delay(attempt: u32, retry_after: Option<f64>) -> Duration {
    let secs = retry_after.unwrap_or_else(|| f64::from(1u32 << attempt));
    Duration::from_secs_f64(secs.min(MAX_BACKOFF_SECS))
}
