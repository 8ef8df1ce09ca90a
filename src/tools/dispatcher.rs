//! Tool dispatcher - routes tool calls to endpoints or fallbacks
//!
//! Dispatch never fails: remote faults become error-shaped values in the
//! transcript so the model can react to them on the next round, and
//! unknown names yield a descriptive result instead of an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::warn;

use crate::core::{Arguments, Config, PulseError, Result};
use crate::tools::fallback::{self, FALLBACK_TOOLS};
use crate::tools::registry::ToolRegistry;

/// Trait for executing tool calls
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Execute a tool with the supplied arguments.
    ///
    /// Always returns a value; failures are folded into an
    /// `{"error": ...}` object.
    async fn dispatch(&self, tool: &str, arguments: &Arguments) -> Value;

    /// All tool names the loop may advertise to the model
    fn tool_names(&self) -> Vec<String>;
}

/// Dispatcher backed by remote HTTP endpoints with built-in fallbacks
pub struct HttpToolDispatcher {
    client: Client,
    registry: ToolRegistry,
}

impl HttpToolDispatcher {
    /// Create a dispatcher from configuration
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.tools.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            registry: ToolRegistry::from_config(config),
        }
    }

    /// Create a dispatcher over an existing registry
    pub fn with_registry(registry: ToolRegistry) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, registry }
    }

    /// The registry backing this dispatcher
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    async fn call_endpoint(&self, endpoint: &str, arguments: &Arguments) -> Result<Value> {
        let response = self
            .client
            .post(endpoint)
            .json(arguments)
            .send()
            .await
            .map_err(|e| PulseError::Other(format!("tool endpoint unreachable: {e}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(PulseError::Other(format!(
                "tool endpoint returned {status}: {body}"
            )));
        }

        // Non-JSON bodies are carried as plain strings.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[async_trait]
impl ToolDispatcher for HttpToolDispatcher {
    async fn dispatch(&self, tool: &str, arguments: &Arguments) -> Value {
        if let Some(endpoint) = self.registry.endpoint(tool) {
            return match self.call_endpoint(endpoint, arguments).await {
                Ok(value) => value,
                Err(e) => {
                    warn!(tool, error = %e, "tool invocation failed");
                    json!({"error": e.to_string()})
                }
            };
        }

        if let Some(value) = fallback::run(tool, arguments) {
            return value;
        }

        Value::String(format!("Unknown tool {tool}"))
    }

    fn tool_names(&self) -> Vec<String> {
        let mut names = self.registry.names();
        for name in FALLBACK_TOOLS {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names.sort();
        names
    }
}
