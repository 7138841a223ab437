// ABOUTME: Integration tests wiring actions, registry, dispatcher and agent together.
// ABOUTME: Uses the in-memory store and scripted model, so nothing leaves the process.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

use hello_phoenix::prelude::*;
use hello_phoenix::testing::ScriptedClient;

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn full_registry(store: &MemoryStore) -> Registry {
    let mut registry = Registry::new();
    registry.extend(greeting_actions()).unwrap();
    registry
        .extend(trace_store_actions(Arc::new(store.clone())))
        .unwrap();
    registry
}

#[tokio::test]
async fn test_greetings_for_ada() {
    let store = MemoryStore::new();
    let registry = full_registry(&store);

    let expected = [
        ("hello_english", "Hello Ada"),
        ("hello_spanish", "Hola Ada"),
        ("hello_mandarin", "你好 Ada"),
        ("hello_hebrew", "שלום Ada"),
    ];
    for (name, greeting) in expected {
        let action = registry.lookup(name).unwrap();
        let result = invoke(action.as_ref(), &args(json!({"name": "Ada"}))).await;
        assert!(result.success, "{} failed: {}", name, result.message);
        assert_eq!(result.data, json!(greeting));
    }
    assert_eq!(store.requests(), 0);
}

#[tokio::test]
async fn test_every_descriptor_is_complete_and_inert() {
    let store = MemoryStore::new().with_project("demo", 5);
    let registry = full_registry(&store);

    for action in registry.all() {
        let rendered = describe(action.as_ref()).to_pretty_json();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["capability"], action.name());
        assert!(!parsed["description"].as_str().unwrap().is_empty());
        assert!(!parsed["inputs"].as_object().unwrap().is_empty());
        assert!(!parsed["outputs"].as_object().unwrap().is_empty());
    }

    assert_eq!(store.requests(), 0);
    assert_eq!(store.trace_count("demo"), Some(5));
}

#[tokio::test]
async fn test_delete_requires_confirmation_then_clears() {
    let store = MemoryStore::new().with_project("demo", 7);
    let registry = full_registry(&store);

    let refused = dispatch(
        &registry,
        "delete_traces",
        DispatchRequest::new(args(json!({"project": "demo"}))),
    )
    .await;
    assert_eq!(refused.exit_code, 1);
    assert_eq!(refused.output["success"], false);
    assert_eq!(store.requests(), 0);
    assert_eq!(store.trace_count("demo"), Some(7));

    let deleted = dispatch(
        &registry,
        "delete_traces",
        DispatchRequest::new(args(json!({"project": "demo", "confirm": true}))),
    )
    .await;
    assert_eq!(deleted.exit_code, 0);
    assert_eq!(
        deleted.output,
        json!({
            "success": true,
            "message": "Successfully deleted 7 traces from project 'demo'",
            "data": {"project": "demo", "deleted_count": 7},
            "count": 7
        })
    );
    assert_eq!(store.trace_count("demo"), Some(0));

    // The project itself survives.
    let listed = dispatch(&registry, "list_projects", DispatchRequest::default()).await;
    assert_eq!(listed.exit_code, 0);
    let names: Vec<&str> = listed.output["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names, vec!["demo"]);

    // Clearing again is a no-op success.
    let again = dispatch(
        &registry,
        "delete_traces",
        DispatchRequest::new(args(json!({"project": "demo", "confirm": "yes"}))),
    )
    .await;
    assert_eq!(again.exit_code, 0);
    assert_eq!(again.output["count"], 0);
}

#[tokio::test]
async fn test_list_traces_limit() {
    let store = MemoryStore::new().with_project("busy", 25);
    let registry = full_registry(&store);

    let limited = dispatch(
        &registry,
        "list_traces",
        DispatchRequest::new(args(json!({"project": "busy", "limit": "10"}))),
    )
    .await;
    assert_eq!(limited.output["count"], 10);
    assert_eq!(limited.output["data"].as_array().unwrap().len(), 10);

    let all = dispatch(
        &registry,
        "list_traces",
        DispatchRequest::new(args(json!({"project": "busy"}))),
    )
    .await;
    assert_eq!(all.output["count"], 25);
    assert_eq!(all.output["message"], "Found 25 traces in project 'busy'");
}

#[tokio::test]
async fn test_unknown_project_is_failure_not_empty_success() {
    let store = MemoryStore::new().with_project("demo", 1);
    let registry = full_registry(&store);

    let out = dispatch(
        &registry,
        "list_traces",
        DispatchRequest::new(args(json!({"project": "ghost"}))),
    )
    .await;
    assert_eq!(out.exit_code, 1);
    assert_eq!(out.output["message"], "Project 'ghost' not found");
}

#[tokio::test]
async fn test_remote_error_becomes_structured_failure() {
    let store = MemoryStore::new().with_project("demo", 1);
    store.fail_with("upstream unavailable");
    let registry = full_registry(&store);

    let out = dispatch(&registry, "list_projects", DispatchRequest::default()).await;
    assert_eq!(out.exit_code, 1);
    assert_eq!(out.output["data"], json!([]));
    assert!(
        out.output["message"]
            .as_str()
            .unwrap()
            .contains("upstream unavailable")
    );
}

#[tokio::test]
async fn test_agent_compares_strategies() {
    let mut registry = Registry::new();
    registry.extend(greeting_actions()).unwrap();
    let registry = Arc::new(registry);

    let fan_out_client = Arc::new(
        Language::ALL
            .iter()
            .zip(default_cases())
            .fold(ScriptedClient::new(), |client, (lang, case)| {
                client.respond_with(vec![ToolCall::new(
                    "call",
                    lang.action_name(),
                    json!({"name": case.person}),
                )])
            }),
    );
    let single_client = Arc::new(
        ScriptedClient::new().respond_with(
            default_cases()
                .iter()
                .map(|c| {
                    ToolCall::new(
                        c.person.clone(),
                        c.language.action_name(),
                        json!({"name": c.person}),
                    )
                })
                .collect(),
        ),
    );

    let fan_out = Agent::new(
        Arc::clone(&registry),
        Arc::new(LlmSelector::new(fan_out_client.clone(), "m")),
    );
    let single = Agent::new(
        Arc::clone(&registry),
        Arc::new(LlmSelector::new(single_client.clone(), "m")),
    );

    let a = run_strategy(&fan_out, Strategy::FanOut, &default_cases())
        .await
        .unwrap();
    let b = run_strategy(&single, Strategy::SinglePass, &default_cases())
        .await
        .unwrap();

    assert_eq!((a.model_calls, b.model_calls), (4, 1));
    assert_eq!((a.actions_invoked, b.actions_invoked), (4, 4));
    assert_eq!(a.greetings, b.greetings);
    assert!(b.total_tokens() < a.total_tokens());

    // Every model call was offered all four actions.
    for request in fan_out_client.requests() {
        assert_eq!(request.tools, registry.to_definitions());
    }
}
