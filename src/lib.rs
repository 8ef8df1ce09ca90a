//! Pulse - Tool-Orchestrating Reasoning Agent
//!
//! A goal-driven agent service: each round it asks an LLM inference
//! endpoint what should happen next, parses a structured decision out of
//! the free-form completion, dispatches external tools, and terminates
//! on an explicit final answer or a hard round ceiling.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Model invoker abstraction with family-specific envelopes
//! - **Tools**: Tool registry, dispatch, and built-in fallbacks
//! - **State**: Best-effort session transcript persistence
//! - **Agent**: Decision extraction and the reasoning loop
//! - **Server**: HTTP surface for running sessions
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pulse::agent::Orchestrator;
//! use pulse::core::Config;
//! use pulse::llm::InferenceClient;
//! use pulse::state::NullStateStore;
//! use pulse::tools::HttpToolDispatcher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let orchestrator = Orchestrator::new(
//!         &config,
//!         Arc::new(InferenceClient::from_config(&config)),
//!         Arc::new(HttpToolDispatcher::from_config(&config)),
//!         Arc::new(NullStateStore),
//!     );
//!
//!     let outcome = orchestrator.run("Analyze customer 123 health").await.unwrap();
//!     println!("{:?}", outcome.result);
//! }
//! ```

pub mod agent;
pub mod core;
pub mod llm;
pub mod server;
pub mod state;
pub mod tools;

// Re-export commonly used items
pub use agent::Orchestrator;
pub use core::{Config, PulseError, Result};
