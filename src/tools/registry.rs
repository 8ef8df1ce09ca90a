//! Tool registry - maps tool names to remote endpoints
//!
//! Built once from configuration and read-only for the lifetime of the
//! process. Names absent from the registry are handled by the fallback
//! table, not treated as errors.

use std::collections::HashMap;

use crate::core::Config;

/// Registry of remotely callable tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    /// Tool name -> endpoint URL
    endpoints: HashMap<String, String>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoints: config.tools.endpoints.clone(),
        }
    }

    /// Register an endpoint for a tool name
    pub fn register(&mut self, name: impl Into<String>, endpoint: impl Into<String>) {
        self.endpoints.insert(name.into(), endpoint.into());
    }

    /// Endpoint for a tool name, matched case-sensitively
    pub fn endpoint(&self, name: &str) -> Option<&str> {
        self.endpoints.get(name).map(String::as_str)
    }

    /// Registered tool names, sorted for stable prompt composition
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.endpoints.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
