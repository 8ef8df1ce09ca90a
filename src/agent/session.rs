//! Session loop state
//!
//! Tracks one reasoning run: round counter, transcript, the previous
//! round's tool and result, and the state-machine status. Terminal
//! statuses are absorbing; once one is recorded no further model or
//! tool calls occur for the session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Arguments, Decision, Step, Transcript};

/// State-machine status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The loop is still producing rounds
    Running,
    /// The model returned an explicit final answer
    Completed,
    /// The round ceiling stopped the session
    LimitReached,
    /// An inference fault ended the session
    Failed,
}

impl SessionStatus {
    /// Whether this status ends the loop
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Outcome of a completed session
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session_id: String,
    pub status: SessionStatus,
    /// The final answer; absent when the round ceiling stopped the loop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub transcript: Transcript,
}

/// Mutable state carried across rounds of one session
#[derive(Debug)]
pub struct SessionState {
    /// Rounds started so far (1-based after the first `next_round`)
    pub round: u32,
    /// Hard ceiling on rounds
    pub max_rounds: u32,
    /// Current state-machine status
    pub status: SessionStatus,
    /// Append-only record of all rounds
    pub transcript: Transcript,
    /// Tool dispatched in the previous round
    pub last_tool: Option<String>,
    /// Result of the previous round's tool call
    pub last_result: Option<Value>,
}

impl SessionState {
    /// Create state for a fresh session
    pub fn new(max_rounds: u32) -> Self {
        Self {
            round: 0,
            max_rounds,
            status: SessionStatus::Running,
            transcript: Transcript::new(),
            last_tool: None,
            last_result: None,
        }
    }

    /// Check if the loop should produce another round
    pub fn should_continue(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Start the next round and return its 1-based index
    pub fn next_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }

    /// Whether the round counter has reached the ceiling
    pub fn at_limit(&self) -> bool {
        self.round >= self.max_rounds
    }

    /// Record a tool round: appends the step and updates the
    /// previous-round context for the next prompt.
    pub fn record_tool(&mut self, round: u32, tool: String, arguments: Arguments, result: Value) {
        self.last_tool = Some(tool.clone());
        self.last_result = Some(result.clone());
        self.transcript
            .push(Step::round(round, Decision::InvokeTool { tool, arguments }, result));
    }

    /// Record the terminal final-answer step
    pub fn record_final(&mut self, round: u32, result: String) {
        self.transcript.push(Step::round(
            round,
            Decision::final_answer(result.clone()),
            Value::String(result),
        ));
        self.status = SessionStatus::Completed;
    }

    /// Record the safety-stop marker when the ceiling is hit
    pub fn record_limit(&mut self) {
        self.transcript.push(Step::limit_marker());
        self.status = SessionStatus::LimitReached;
    }

    /// Record an inference fault
    pub fn record_failure(&mut self) {
        self.status = SessionStatus::Failed;
    }
}
