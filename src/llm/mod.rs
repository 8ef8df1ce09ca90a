//! LLM module - model invocation
//!
//! Provides the model invoker abstraction, family-specific wire envelopes,
//! and the HTTP client for the inference gateway.

pub mod client;
pub mod families;
pub mod traits;

pub use client::InferenceClient;
pub use families::ModelFamily;
pub use traits::{GenerateOptions, ModelInvoker};
