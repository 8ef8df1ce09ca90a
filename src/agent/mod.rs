//! Agent module - the reasoning loop
//!
//! Contains decision extraction, session state, and the orchestrator
//! that drives prompt -> model -> decision -> tool rounds.

pub mod extractor;
pub mod orchestrator;
pub mod session;

pub use extractor::extract;
pub use orchestrator::Orchestrator;
pub use session::{SessionOutcome, SessionState, SessionStatus};
