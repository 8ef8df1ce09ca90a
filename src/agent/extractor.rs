//! Decision extraction from raw model output
//!
//! Models wrap their JSON in commentary or markdown fences often enough
//! that extraction has to be best-effort. This is modeled as an
//! infallible parse step: unusable text becomes a synthetic final
//! answer carrying the raw output, so the loop always has a
//! well-defined next state.

use serde_json::Value;

use crate::core::Decision;

/// Parse a raw completion into a decision.
///
/// Pure and deterministic; never returns an error.
pub fn extract(raw: &str) -> Decision {
    let candidate = json_candidate(raw);

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Decision::from_value(&value).unwrap_or_else(|| fallback_answer(raw)),
        Err(_) => fallback_answer(raw),
    }
}

/// The greedy `{...}` span of the text, or the whole text when no
/// braces are present.
fn json_candidate(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

fn fallback_answer(raw: &str) -> Decision {
    Decision::final_answer(format!("Bad JSON: {raw}"))
}
