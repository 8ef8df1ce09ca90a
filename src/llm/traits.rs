//! Model invoker trait for abstracting the inference backend
//!
//! Enables substituting the live gateway client with test doubles.

use async_trait::async_trait;

use crate::core::Result;

/// Options for model generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

/// Trait for invoking a text-generation model.
///
/// Implementations format the prompt into the envelope the model family
/// expects and return the generated text. Failures are fatal for the
/// calling round; the reasoning loop does not retry.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Generate a completion for a prompt/system-instruction pair
    async fn invoke(&self, prompt: &str, system: &str, model_id: &str) -> Result<String>;
}
