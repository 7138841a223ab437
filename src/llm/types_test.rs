// ABOUTME: Tests for LLM types - request builder, tool call serialization,
// ABOUTME: and usage arithmetic.

use super::*;

#[test]
fn test_tool_call_serialization() {
    let call = ToolCall::new("call_1", "hello_spanish", serde_json::json!({"name": "Bob"}));
    let json = serde_json::to_value(&call).unwrap();
    assert_eq!(json["name"], "hello_spanish");
    assert_eq!(json["arguments"]["name"], "Bob");
}

#[test]
fn test_request_builder() {
    let req = Request::new("gpt-3.5-turbo")
        .prompt("Greet Bob in Spanish")
        .system("You are a greeting assistant")
        .max_tokens(256)
        .temperature(0.0);

    assert_eq!(req.model, "gpt-3.5-turbo");
    assert_eq!(req.prompt, "Greet Bob in Spanish");
    assert_eq!(req.system.as_deref(), Some("You are a greeting assistant"));
    assert_eq!(req.max_tokens, Some(256));
    assert_eq!(req.temperature, Some(0.0));
    assert!(req.tools.is_empty());
}

#[test]
fn test_usage_accumulates() {
    let mut usage = Usage {
        input_tokens: 10,
        output_tokens: 2,
    };
    usage += Usage {
        input_tokens: 5,
        output_tokens: 3,
    };
    assert_eq!(usage.input_tokens, 15);
    assert_eq!(usage.total(), 20);
}
