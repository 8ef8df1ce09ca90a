//! Test doubles shared by the integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pulse::core::{Config, PulseError, Result, Transcript};
use pulse::llm::ModelInvoker;
use pulse::state::StateStore;

/// Invoker that replays a fixed script of completions and records every
/// prompt it receives.
pub struct ScriptedInvoker {
    responses: Mutex<VecDeque<String>>,
    default: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedInvoker {
    /// Replay the given completions in order; panics if exhausted.
    pub fn scripted(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            default: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Return the same completion on every call.
    pub fn repeating(response: &str) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            default: Some(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn invoke(&self, prompt: &str, _system: &str, _model_id: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        Ok(next
            .or_else(|| self.default.clone())
            .expect("scripted invoker exhausted"))
    }
}

/// Invoker whose every call fails like an unreachable gateway.
pub struct FailingInvoker;

#[async_trait]
impl ModelInvoker for FailingInvoker {
    async fn invoke(&self, _prompt: &str, _system: &str, _model_id: &str) -> Result<String> {
        Err(PulseError::inference("gateway unreachable"))
    }
}

/// Store that records every persisted snapshot.
#[derive(Default)]
pub struct RecordingStore {
    pub writes: Mutex<Vec<(String, usize)>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl StateStore for RecordingStore {
    async fn persist(&self, session_id: &str, transcript: &Transcript) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((session_id.to_string(), transcript.len()));
        Ok(())
    }
}

/// Store whose every write fails.
pub struct FailingStore;

#[async_trait]
impl StateStore for FailingStore {
    async fn persist(&self, _session_id: &str, _transcript: &Transcript) -> Result<()> {
        Err(PulseError::state("table unavailable"))
    }
}

/// Default configuration for loop tests: the stock round ceiling and
/// context window.
pub fn test_config() -> Config {
    Config::default()
}
