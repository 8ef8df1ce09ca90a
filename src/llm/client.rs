//! Inference gateway client
//!
//! Async HTTP client for the model inference gateway. Formats requests
//! into the envelope the target model family expects and digs the
//! generated text out of the family-specific response shape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::{Config, PulseError, Result};
use crate::llm::families::ModelFamily;
use crate::llm::traits::{GenerateOptions, ModelInvoker};

/// HTTP client for the inference gateway
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    options: GenerateOptions,
}

impl InferenceClient {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.inference.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.inference.endpoint.trim_end_matches('/').to_string(),
            api_key: config.inference.api_key.clone(),
            options: GenerateOptions {
                max_tokens: config.inference.max_tokens,
                temperature: config.inference.temperature,
            },
        }
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
            options: GenerateOptions::default(),
        }
    }
}

#[async_trait]
impl ModelInvoker for InferenceClient {
    async fn invoke(&self, prompt: &str, system: &str, model_id: &str) -> Result<String> {
        let family = ModelFamily::detect(model_id);
        let body = family.request_body(prompt, system, &self.options);

        let url = format!("{}/model/{}/invoke", self.base_url, model_id);
        let mut request = self.client.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.header("authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                PulseError::inference(format!(
                    "cannot reach inference gateway at {}: {e}",
                    self.base_url
                ))
            } else if e.is_timeout() {
                PulseError::inference(format!("inference call timed out: {e}"))
            } else {
                PulseError::inference(format!("inference request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PulseError::inference(format!(
                "inference gateway returned {status}: {detail}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| PulseError::inference(format!("failed to decode inference response: {e}")))?;

        // If the expected field path is absent, hand the extractor the
        // whole response rather than an empty string.
        Ok(family
            .extract_text(&payload)
            .unwrap_or_else(|| payload.to_string()))
    }
}
