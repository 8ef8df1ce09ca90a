//! Shared types used across Pulse modules
//!
//! Contains the decision model, transcript steps, and common aliases.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Tool name that signals session completion instead of a tool call.
pub const FINAL_ANSWER: &str = "final_answer";

/// Arguments passed to a tool invocation.
pub type Arguments = serde_json::Map<String, Value>;

/// Structured intent extracted from one round of model output.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The model wants a tool executed with the given arguments.
    InvokeTool { tool: String, arguments: Arguments },
    /// The model is done; `result` is the session's answer.
    FinalAnswer { result: String },
}

impl Decision {
    /// Create a tool invocation decision
    pub fn invoke(tool: impl Into<String>, arguments: Arguments) -> Self {
        Self::InvokeTool {
            tool: tool.into(),
            arguments,
        }
    }

    /// Create a final answer decision
    pub fn final_answer(result: impl Into<String>) -> Self {
        Self::FinalAnswer {
            result: result.into(),
        }
    }

    /// Interpret a parsed JSON value as a decision.
    ///
    /// Returns `None` unless the value is an object carrying a string
    /// `tool` field. Tool names are matched case-sensitively.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let tool = object.get("tool")?.as_str()?;

        if tool == FINAL_ANSWER {
            let result = match object.get("result") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            Some(Self::FinalAnswer { result })
        } else {
            let arguments = match object.get("arguments") {
                Some(Value::Object(map)) => map.clone(),
                _ => Arguments::new(),
            };
            Some(Self::InvokeTool {
                tool: tool.to_string(),
                arguments,
            })
        }
    }

    /// Tool name as it appears on the wire (`final_answer` for answers)
    pub fn label(&self) -> &str {
        match self {
            Self::InvokeTool { tool, .. } => tool,
            Self::FinalAnswer { .. } => FINAL_ANSWER,
        }
    }

    /// Whether this decision ends the session
    pub fn is_final(&self) -> bool {
        matches!(self, Self::FinalAnswer { .. })
    }
}

// Wire shape: {"tool": "<name>", "arguments": {...}} or
// {"tool": "final_answer", "result": "..."}.
impl Serialize for Decision {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        match self {
            Self::InvokeTool { tool, arguments } => {
                map.serialize_entry("tool", tool)?;
                map.serialize_entry("arguments", arguments)?;
            }
            Self::FinalAnswer { result } => {
                map.serialize_entry("tool", FINAL_ANSWER)?;
                map.serialize_entry("result", result)?;
            }
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for Decision {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Decision::from_value(&value)
            .ok_or_else(|| D::Error::custom("expected an object with a string `tool` field"))
    }
}

/// One entry in a session transcript.
///
/// Rounds carry the extracted decision and the tool (or final) result;
/// the limit marker is appended once when the round ceiling is hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Round {
        step: u32,
        decision: Decision,
        result: Value,
    },
    Limit {
        warning: String,
    },
}

impl Step {
    /// Create a round record
    pub fn round(step: u32, decision: Decision, result: Value) -> Self {
        Self::Round {
            step,
            decision,
            result,
        }
    }

    /// Create the safety-stop marker appended when the round ceiling is hit
    pub fn limit_marker() -> Self {
        Self::Limit {
            warning: "max rounds reached".to_string(),
        }
    }

    /// Whether this step is the safety-stop marker
    pub fn is_limit_marker(&self) -> bool {
        matches!(self, Self::Limit { .. })
    }
}

/// Ordered, append-only record of all rounds in a session.
///
/// Insertion order is semantically meaningful: the trailing window is
/// replayed into future prompts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    steps: Vec<Step>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// All steps in insertion order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The most recent step, if any
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// The trailing window of at most `n` steps.
    ///
    /// Keeps prompt size roughly constant regardless of run length.
    pub fn tail(&self, n: usize) -> &[Step] {
        let start = self.steps.len().saturating_sub(n);
        &self.steps[start..]
    }

    /// Step count
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
