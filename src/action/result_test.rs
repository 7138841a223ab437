// ABOUTME: Tests for ActionOutput and InvocationResult - count derivation,
// ABOUTME: failure shape, and JSON serialization.

use serde_json::json;

use super::*;

#[test]
fn test_ok_counts_arrays() {
    let result = InvocationResult::ok(ActionOutput::new("Found 2", json!([1, 2])));
    assert!(result.success);
    assert_eq!(result.count, Some(2));
}

#[test]
fn test_ok_omits_count_for_scalars() {
    let result = InvocationResult::ok(ActionOutput::new("Greeted", "Hello Ada"));
    assert_eq!(result.count, None);

    let value = serde_json::to_value(&result).unwrap();
    assert!(value.get("count").is_none());
    assert_eq!(value["data"], "Hello Ada");
}

#[test]
fn test_explicit_count_wins() {
    let output = ActionOutput::new("Deleted", json!({"deleted_count": 7})).with_count(7);
    let result = InvocationResult::ok(output);
    assert_eq!(result.count, Some(7));
}

#[test]
fn test_failure_shape() {
    let result = InvocationResult::failure("boom");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": false, "message": "boom", "data": [], "count": 0})
    );
}
