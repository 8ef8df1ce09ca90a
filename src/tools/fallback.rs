//! Built-in fallback tools
//!
//! Deterministic stand-ins used when a tool name has no registered
//! endpoint, so the loop stays exercisable without live backing tools.

use serde_json::{json, Value};

use crate::core::Arguments;

/// Names handled by the fallback table
pub const FALLBACK_TOOLS: &[&str] = &["get_customer_metrics", "summarize_metrics", "send_alert"];

/// Run the fallback behavior for a tool name.
///
/// Returns `None` when the name has no fallback.
pub fn run(tool: &str, arguments: &Arguments) -> Option<Value> {
    match tool {
        "get_customer_metrics" => Some(get_customer_metrics(arguments)),
        "summarize_metrics" => Some(summarize_metrics(arguments)),
        "send_alert" => Some(send_alert(arguments)),
        _ => None,
    }
}

fn customer_id(arguments: &Arguments) -> &str {
    arguments
        .get("customer_id")
        .and_then(Value::as_str)
        .unwrap_or("123")
}

fn get_customer_metrics(arguments: &Arguments) -> Value {
    json!({
        "customer_id": customer_id(arguments),
        "uptime": 99.8,
        "tickets": 2,
        "nps": 87,
    })
}

fn summarize_metrics(arguments: &Arguments) -> Value {
    // The metrics object arrives under either `metrics` or `metrics_json`
    // depending on the caller; both name the same field.
    let metrics = arguments
        .get("metrics")
        .or_else(|| arguments.get("metrics_json"))
        .and_then(Value::as_object);

    let field = |key: &str| -> String {
        metrics
            .and_then(|m| m.get(key))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "unknown".to_string())
    };

    Value::String(format!(
        "Customer {} uptime {}%, NPS {}.",
        field("customer_id"),
        field("uptime"),
        field("nps"),
    ))
}

fn send_alert(arguments: &Arguments) -> Value {
    Value::String(format!(
        "Alert sent for customer {}.",
        customer_id(arguments)
    ))
}
