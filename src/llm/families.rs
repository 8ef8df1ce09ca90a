//! Model family envelopes
//!
//! Request and response schemas differ per model family; the family is
//! selected by inspecting the model identifier's prefix.

use serde_json::{json, Value};

use crate::llm::traits::GenerateOptions;

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Known model families and their wire envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Message-list request with role/content blocks, nested content
    /// blocks in the response (`anthropic.` model ids).
    Conversational,
    /// Flat input-text request with generation parameters, results list
    /// with an output-text field in the response (`amazon.` model ids).
    TextCompletion,
}

impl ModelFamily {
    /// Select a family from a model identifier.
    ///
    /// Unrecognized identifiers take the simplest envelope rather than
    /// failing, so the loop stays resilient to configuration drift.
    pub fn detect(model_id: &str) -> Self {
        if model_id.starts_with("anthropic.") {
            Self::Conversational
        } else if model_id.starts_with("amazon.") {
            Self::TextCompletion
        } else {
            Self::TextCompletion
        }
    }

    /// Build the family-specific request body
    pub fn request_body(&self, prompt: &str, system: &str, options: &GenerateOptions) -> Value {
        match self {
            Self::Conversational => json!({
                "anthropic_version": ANTHROPIC_VERSION,
                "max_tokens": options.max_tokens,
                "system": system,
                "messages": [{
                    "role": "user",
                    "content": [{"type": "text", "text": prompt}],
                }],
            }),
            Self::TextCompletion => json!({
                "inputText": format!("{system}\n\n{prompt}"),
                "textGenerationConfig": {
                    "maxTokenCount": options.max_tokens,
                    "temperature": options.temperature,
                },
            }),
        }
    }

    /// Extract the generated text from a family-specific response body.
    ///
    /// Returns `None` when the expected field path is absent; callers fall
    /// back to serializing the whole response.
    pub fn extract_text(&self, response: &Value) -> Option<String> {
        match self {
            Self::Conversational => {
                let blocks = response.get("content")?.as_array()?;
                blocks.iter().find_map(|block| {
                    if block.get("type").and_then(Value::as_str) == Some("text") {
                        block.get("text").and_then(Value::as_str).map(str::to_string)
                    } else {
                        None
                    }
                })
            }
            Self::TextCompletion => response
                .get("results")?
                .get(0)?
                .get("outputText")?
                .as_str()
                .map(str::to_string),
        }
    }
}
