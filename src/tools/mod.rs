//! Tools module - tool registry, dispatch, and fallbacks
//!
//! The registry maps tool names to remote endpoints; names without an
//! endpoint are handled by deterministic built-in stand-ins.

pub mod dispatcher;
pub mod fallback;
pub mod registry;

pub use dispatcher::{HttpToolDispatcher, ToolDispatcher};
pub use registry::ToolRegistry;
