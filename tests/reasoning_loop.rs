//! Reasoning loop integration tests
//!
//! Drives the orchestrator end to end with scripted model output and
//! injected collaborators.

mod common;

use std::sync::Arc;

use pulse::agent::{Orchestrator, SessionStatus};
use pulse::core::Step;
use pulse::tools::{HttpToolDispatcher, ToolRegistry};

use common::{test_config, FailingInvoker, FailingStore, RecordingStore, ScriptedInvoker};

fn fallback_tools() -> Arc<HttpToolDispatcher> {
    Arc::new(HttpToolDispatcher::with_registry(ToolRegistry::new()))
}

#[tokio::test]
async fn completes_after_tool_then_final_answer() {
    let invoker = ScriptedInvoker::scripted(&[
        r#"{"tool":"get_customer_metrics","arguments":{"customer_id":"123"}}"#,
        r#"{"tool":"final_answer","result":"done"}"#,
    ]);
    let store = RecordingStore::new();
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker.clone(),
        fallback_tools(),
        store.clone(),
    );

    let outcome = orchestrator
        .run("Analyze customer 123 health")
        .await
        .unwrap();

    assert_eq!(outcome.status, SessionStatus::Completed);
    assert_eq!(outcome.result.as_deref(), Some("done"));
    assert_eq!(outcome.transcript.len(), 2);

    // The first round's tool call ran through the fallback table.
    match &outcome.transcript.steps()[0] {
        Step::Round { step, result, .. } => {
            assert_eq!(*step, 1);
            assert_eq!(result["customer_id"], "123");
        }
        _ => panic!("expected round step"),
    }

    // Round 1 advertises no previous tool; round 2 carries it.
    let prompts = invoker.prompts.lock().unwrap();
    assert!(prompts[0].contains("Last tool used: None"));
    assert!(prompts[0].contains("Analyze customer 123 health"));
    assert!(prompts[0].contains("get_customer_metrics"));
    assert!(prompts[1].contains("Last tool used: get_customer_metrics"));

    // Persisted once, at termination, with the full transcript.
    let writes = store.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1, 2);
    assert_eq!(writes[0].0, outcome.session_id);
}

#[tokio::test]
async fn round_ceiling_stops_a_model_that_never_finishes() {
    let invoker = ScriptedInvoker::repeating(r#"{"tool":"loop_tool","arguments":{}}"#);
    let store = RecordingStore::new();
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker.clone(),
        fallback_tools(),
        store.clone(),
    );

    let outcome = orchestrator.run("never ends").await.unwrap();

    assert_eq!(outcome.status, SessionStatus::LimitReached);
    assert!(outcome.result.is_none());
    // Exactly 8 model calls, 8 round steps, plus the limit marker.
    assert_eq!(invoker.calls(), 8);
    assert_eq!(outcome.transcript.len(), 9);
    assert!(outcome.transcript.last().unwrap().is_limit_marker());

    // An unknown tool yields a descriptive value, not a fault.
    match &outcome.transcript.steps()[0] {
        Step::Round { result, .. } => {
            assert_eq!(result.as_str().unwrap(), "Unknown tool loop_tool");
        }
        _ => panic!("expected round step"),
    }

    assert_eq!(store.writes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn prompt_window_stays_bounded() {
    let invoker = ScriptedInvoker::repeating(r#"{"tool":"loop_tool","arguments":{}}"#);
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker.clone(),
        fallback_tools(),
        RecordingStore::new(),
    );

    orchestrator.run("never ends").await.unwrap();

    // By round 8 seven steps exist; only the latest three are replayed.
    let prompts = invoker.prompts.lock().unwrap();
    let last_prompt = prompts.last().unwrap();
    assert!(last_prompt.contains("\"step\": 7"));
    assert!(last_prompt.contains("\"step\": 5"));
    assert!(!last_prompt.contains("\"step\": 4"));
}

#[tokio::test]
async fn plain_text_output_terminates_with_synthetic_answer() {
    let invoker = ScriptedInvoker::scripted(&["I think the answer is 42"]);
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker,
        fallback_tools(),
        RecordingStore::new(),
    );

    let outcome = orchestrator.run("what is the answer").await.unwrap();

    assert_eq!(outcome.status, SessionStatus::Completed);
    assert_eq!(outcome.transcript.len(), 1);
    assert!(outcome.result.unwrap().contains("42"));
}

#[tokio::test]
async fn tool_endpoint_failure_becomes_data_and_loop_continues() {
    let invoker = ScriptedInvoker::scripted(&[
        r#"{"tool":"get_customer_metrics","arguments":{}}"#,
        r#"{"tool":"final_answer","result":"done"}"#,
    ]);
    // A registered endpoint with a malformed URL fails on dispatch.
    let mut registry = ToolRegistry::new();
    registry.register("get_customer_metrics", "not a url");
    let tools = Arc::new(HttpToolDispatcher::with_registry(registry));
    let orchestrator =
        Orchestrator::new(&test_config(), invoker, tools, RecordingStore::new());

    let outcome = orchestrator.run("Analyze customer 123 health").await.unwrap();

    assert_eq!(outcome.status, SessionStatus::Completed);
    assert_eq!(outcome.transcript.len(), 2);
    match &outcome.transcript.steps()[0] {
        Step::Round { result, .. } => assert!(result.get("error").is_some()),
        _ => panic!("expected round step"),
    }
}

#[tokio::test]
async fn inference_fault_is_fatal_for_the_session() {
    let orchestrator = Orchestrator::new(
        &test_config(),
        Arc::new(FailingInvoker),
        fallback_tools(),
        RecordingStore::new(),
    );

    let err = orchestrator.run("anything").await.unwrap_err();
    assert!(err.to_string().contains("gateway unreachable"));
}

#[tokio::test]
async fn persistence_failure_never_fails_the_session() {
    let invoker = ScriptedInvoker::scripted(&[r#"{"tool":"final_answer","result":"ok"}"#]);
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker,
        fallback_tools(),
        Arc::new(FailingStore),
    );

    let outcome = orchestrator.run("anything").await.unwrap();
    assert_eq!(outcome.result.as_deref(), Some("ok"));
    assert_eq!(outcome.transcript.len(), 1);
}

#[tokio::test]
async fn final_answer_round_trips_verbatim() {
    let answer = "Customer 123: uptime 99.8%, NPS 87, healthy.";
    let script = format!(r#"{{"tool":"final_answer","result":"{answer}"}}"#);
    let invoker = ScriptedInvoker::scripted(&[&script]);
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker,
        fallback_tools(),
        RecordingStore::new(),
    );

    let outcome = orchestrator.run("Analyze customer 123 health").await.unwrap();
    assert_eq!(outcome.result.as_deref(), Some(answer));
}

#[tokio::test]
async fn summarize_step_flows_previous_metrics() {
    let invoker = ScriptedInvoker::scripted(&[
        r#"{"tool":"get_customer_metrics","arguments":{"customer_id":"123"}}"#,
        r#"{"tool":"summarize_metrics","arguments":{"metrics":{"customer_id":"123","uptime":99.8,"nps":87}}}"#,
        r#"{"tool":"final_answer","result":"done"}"#,
    ]);
    let orchestrator = Orchestrator::new(
        &test_config(),
        invoker,
        fallback_tools(),
        RecordingStore::new(),
    );

    let outcome = orchestrator.run("Analyze customer 123 health").await.unwrap();

    assert_eq!(outcome.transcript.len(), 3);
    match &outcome.transcript.steps()[1] {
        Step::Round { result, .. } => {
            assert_eq!(
                result.as_str().unwrap(),
                "Customer 123 uptime 99.8%, NPS 87."
            );
        }
        _ => panic!("expected round step"),
    }
}
