//! Reasoning loop orchestrator
//!
//! Owns one session at a time: composes the evolving prompt, invokes the
//! model, extracts a decision, dispatches tools, and enforces the round
//! ceiling. Collaborators are injected at construction so test doubles
//! can stand in for the live services.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::agent::extractor::extract;
use crate::agent::session::{SessionOutcome, SessionState};
use crate::core::{Config, Decision, Result};
use crate::llm::ModelInvoker;
use crate::state::StateStore;
use crate::tools::ToolDispatcher;

/// Drives the prompt -> model -> decision -> tool loop for a session
pub struct Orchestrator {
    model_id: String,
    max_rounds: u32,
    context_steps: usize,
    invoker: Arc<dyn ModelInvoker>,
    tools: Arc<dyn ToolDispatcher>,
    store: Arc<dyn StateStore>,
}

impl Orchestrator {
    /// Create an orchestrator with injected collaborators
    pub fn new(
        config: &Config,
        invoker: Arc<dyn ModelInvoker>,
        tools: Arc<dyn ToolDispatcher>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            model_id: config.inference.model_id.clone(),
            max_rounds: config.agent.max_rounds,
            context_steps: config.agent.context_steps,
            invoker,
            tools,
            store,
        }
    }

    /// Run one session to a terminal state.
    ///
    /// Returns `Err` only for inference faults; every other condition
    /// (malformed output, tool failure, round ceiling) resolves to a
    /// terminal outcome carrying the full transcript.
    pub async fn run(&self, goal: &str) -> Result<SessionOutcome> {
        let session_id = Uuid::new_v4().to_string();
        info!(session_id = %session_id, goal, "session start");

        let tool_names = self.tools.tool_names();
        let system_prompt = build_system_prompt(&tool_names);

        let mut state = SessionState::new(self.max_rounds);
        let mut final_result = None;

        while state.should_continue() {
            let round = state.next_round();
            let prompt = self.build_round_prompt(goal, &tool_names, &state);

            let raw = match self
                .invoker
                .invoke(&prompt, &system_prompt, &self.model_id)
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    state.record_failure();
                    error!(session_id = %session_id, round, error = %e, "inference call failed");
                    return Err(e);
                }
            };

            let decision = extract(&raw);
            info!(session_id = %session_id, round, tool = decision.label(), "decision");

            match decision {
                Decision::FinalAnswer { result } => {
                    state.record_final(round, result.clone());
                    self.persist_best_effort(&session_id, &state).await;
                    final_result = Some(result);
                }
                Decision::InvokeTool { tool, arguments } => {
                    let result = self.tools.dispatch(&tool, &arguments).await;
                    state.record_tool(round, tool, arguments, result);

                    if state.at_limit() {
                        state.record_limit();
                        self.persist_best_effort(&session_id, &state).await;
                    }
                }
            }
        }

        info!(
            session_id = %session_id,
            rounds = state.round,
            status = ?state.status,
            "session end"
        );

        Ok(SessionOutcome {
            session_id,
            status: state.status,
            result: final_result,
            transcript: state.transcript,
        })
    }

    /// Compose one round's prompt: the goal, the known tools, the
    /// previous round's tool and result, and a bounded trailing window
    /// of the transcript.
    fn build_round_prompt(&self, goal: &str, tool_names: &[String], state: &SessionState) -> String {
        let last_tool = state.last_tool.as_deref().unwrap_or("None");
        let last_result = state
            .last_result
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "None".to_string());
        let recent = serde_json::to_string_pretty(state.transcript.tail(self.context_steps))
            .unwrap_or_else(|_| "[]".to_string());

        format!(
            "User goal: {goal}\n\n\
             Available tools:\n{tools}\n\
             State summary:\n\
             Last tool used: {last_tool}\n\
             Last result: {last_result}\n\n\
             Conversation so far (up to {window} latest steps):\n{recent}\n\n\
             If you already have enough data, return a final_answer.\n\
             Otherwise, select the next most logical tool.\n\n\
             Decide next tool.",
            tools = numbered_list(tool_names),
            window = self.context_steps,
        )
    }

    async fn persist_best_effort(&self, session_id: &str, state: &SessionState) {
        // The transcript is also returned inline, so a failed write must
        // never fail the session.
        if let Err(e) = self.store.persist(session_id, &state.transcript).await {
            warn!(session_id = %session_id, error = %e, "state persistence failed");
        }
    }
}

fn build_system_prompt(tool_names: &[String]) -> String {
    format!(
        "You are an intelligent assistant with access to tools:\n\
         {tools}\
         Always respond in JSON:\n\
         {{\"tool\":\"<tool_name>\",\"arguments\":{{...}}}} or \
         {{\"tool\":\"final_answer\",\"result\":\"...\"}}\n",
        tools = numbered_list(tool_names),
    )
}

fn numbered_list(names: &[String]) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_lists_tools() {
        let names = vec![
            "get_customer_metrics".to_string(),
            "summarize_metrics".to_string(),
        ];
        let prompt = build_system_prompt(&names);

        assert!(prompt.contains("1. get_customer_metrics"));
        assert!(prompt.contains("2. summarize_metrics"));
        assert!(prompt.contains("\"tool\":\"final_answer\""));
    }
}
