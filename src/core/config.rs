//! Configuration management for Pulse
//!
//! Supports environment variables, config files, and runtime overrides.
//! The tool registry is part of configuration: a name -> endpoint table.
//!
//! Config file location: ~/.config/pulse/config.toml

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration for Pulse
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Inference gateway configuration
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Tool registry configuration
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Session state persistence configuration
    #[serde(default)]
    pub state: StateConfig,
    /// Reasoning loop configuration
    #[serde(default)]
    pub agent: AgentConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Inference gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference gateway
    pub endpoint: String,
    /// Model identifier; its prefix selects the request envelope family
    pub model_id: String,
    /// Optional bearer token for the gateway
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum tokens to generate per round
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// Tool registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Tool name -> endpoint URL. Names absent here fall back to the
    /// built-in stand-ins.
    pub endpoints: HashMap<String, String>,
    /// Per-call timeout for tool endpoints in seconds
    pub timeout_secs: u64,
}

/// Session state persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory for persisted session records. `None` disables
    /// persistence entirely.
    pub dir: Option<PathBuf>,
}

/// Reasoning loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Hard ceiling on rounds per session
    /// Default: 8
    pub max_rounds: u32,
    /// Number of trailing transcript steps replayed into each prompt
    /// Default: 3
    pub context_steps: usize,
    /// Goal used when a request omits one
    pub default_goal: String,
    /// Whether to show debug output
    pub debug: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address (default: 127.0.0.1)
    pub host: String,
    /// Port number (default: 7868)
    pub port: u16,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: env::var("PULSE_INFERENCE_URL")
                .unwrap_or_else(|_| "http://localhost:8787".to_string()),
            model_id: env::var("PULSE_MODEL_ID")
                .unwrap_or_else(|_| "anthropic.claude-3-sonnet-20240229-v1:0".to_string()),
            api_key: env::var("PULSE_API_KEY").ok(),
            timeout_secs: 30,
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        // PULSE_TOOLS carries a JSON object mapping tool names to
        // endpoint URLs, matching how deployments inject the registry.
        let endpoints = env::var("PULSE_TOOLS")
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            endpoints,
            timeout_secs: 10,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        let dir = match env::var("PULSE_STATE_DIR") {
            Ok(dir) if dir.is_empty() => None,
            Ok(dir) => Some(PathBuf::from(dir)),
            Err(_) => dirs::data_dir().map(|d| d.join("pulse").join("sessions")),
        };

        Self { dir }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: 8,
            context_steps: 3,
            default_goal: "Analyze customer 123 health".to_string(),
            debug: env::var("PULSE_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::var("PULSE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PULSE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7868),
        }
    }
}

impl ServerConfig {
    /// Bind address as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the config file, falling back to defaults.
    ///
    /// Missing sections and fields are filled from the `Default` impls,
    /// which consult environment variables.
    pub fn load() -> Self {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                        }
                    },
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "cannot read config file, using defaults");
                    }
                }
            }
        }

        Self::default()
    }

    /// Path of the config file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pulse").join("config.toml"))
    }
}
