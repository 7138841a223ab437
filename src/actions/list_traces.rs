// ABOUTME: ListTracesAction - lists traces of a named project, one row per trace,
// ABOUTME: optionally bounded by a limit and a store-side filter condition.

use std::sync::Arc;

use async_trait::async_trait;

use super::{connect, endpoint_param, project_param, resolve_project};
use crate::action::{Action, ActionOutput, Arguments, InputSchema, ParamSpec};
use crate::error::ActionError;
use crate::store::{SpanQuery, StoreConnector, summarize_traces};

/// Lists traces from a project.
pub struct ListTracesAction {
    connector: Arc<dyn StoreConnector>,
}

impl ListTracesAction {
    /// Create the action over a store connector.
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl Action for ListTracesAction {
    fn name(&self) -> &str {
        "list_traces"
    }

    fn description(&self) -> &str {
        "Lists traces from the specified Phoenix project with optional filtering"
    }

    fn inputs(&self) -> InputSchema {
        InputSchema::new()
            .param(project_param())
            .param(ParamSpec::integer("limit", "Maximum number of traces to return").optional())
            .param(ParamSpec::string("filter", "Filter condition for traces").optional())
            .param(endpoint_param())
    }

    fn outputs(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("success", "boolean"),
            ("message", "string"),
            ("data", "array"),
            ("count", "integer"),
        ]
    }

    /// Resolving the project is one request; root spans then arrive page by
    /// page, so a single listing makes several requests to the store.
    async fn execute(&self, args: &Arguments) -> Result<ActionOutput, ActionError> {
        let project_name = args.string("project")?;
        let store = connect(self.connector.as_ref(), args)?;
        let project = resolve_project(store.as_ref(), &project_name).await?;

        let query = SpanQuery {
            limit: args.int("limit"),
            filter: args.str("filter").map(str::to_string),
        };
        let spans = store.root_spans(&project.id, &query).await?;
        let traces = summarize_traces(&spans, query.limit);

        let message = if traces.is_empty() {
            format!("No traces found in project '{}'", project_name)
        } else {
            format!(
                "Found {} traces in project '{}'",
                traces.len(),
                project_name
            )
        };
        let data = serde_json::to_value(&traces).map_err(|e| ActionError::Execution(e.into()))?;
        Ok(ActionOutput::new(message, data))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::action::invoke;
    use crate::store::MemoryStore;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_limit_bounds_listing() {
        let store = MemoryStore::new().with_project("demo", 25);
        let action = ListTracesAction::new(Arc::new(store));

        let limited = invoke(&action, &args(json!({"project": "demo", "limit": 10}))).await;
        assert!(limited.success);
        assert_eq!(limited.count, Some(10));
        assert_eq!(limited.data.as_array().unwrap().len(), 10);

        let all = invoke(&action, &args(json!({"project": "demo"}))).await;
        assert_eq!(all.count, Some(25));
        assert_eq!(all.message, "Found 25 traces in project 'demo'");
    }

    #[tokio::test]
    async fn test_listing_looks_up_project_before_spans() {
        let store = MemoryStore::new().with_project("demo", 3);
        let action = ListTracesAction::new(Arc::new(store.clone()));

        let result = invoke(&action, &args(json!({"project": "demo"}))).await;
        assert!(result.success);
        assert_eq!(store.requests(), 2);
    }

    #[tokio::test]
    async fn test_record_shape() {
        let store = MemoryStore::new().with_project("demo", 1);
        let action = ListTracesAction::new(Arc::new(store));

        let result = invoke(&action, &args(json!({"project": "demo"}))).await;
        let row = &result.data[0];
        assert_eq!(row["trace_id"], "demo-trace-0");
        assert_eq!(row["first_span_name"], "greeting-0");
        assert_eq!(row["status_code"], "OK");
        assert_eq!(row["token_count_total"], 42);
    }

    #[tokio::test]
    async fn test_unknown_project_is_failure() {
        let store = MemoryStore::new().with_project("demo", 3);
        let action = ListTracesAction::new(Arc::new(store));

        let result = invoke(&action, &args(json!({"project": "ghost"}))).await;
        assert!(!result.success);
        assert_eq!(result.message, "Project 'ghost' not found");
        assert_eq!(result.count, Some(0));
    }

    #[tokio::test]
    async fn test_empty_project() {
        let store = MemoryStore::new().with_project("quiet", 0);
        let action = ListTracesAction::new(Arc::new(store));

        let result = invoke(&action, &args(json!({"project": "quiet"}))).await;
        assert!(result.success);
        assert_eq!(result.message, "No traces found in project 'quiet'");
        assert_eq!(result.count, Some(0));
    }

    #[tokio::test]
    async fn test_limit_as_string() {
        let store = MemoryStore::new().with_project("demo", 5);
        let action = ListTracesAction::new(Arc::new(store));

        let result = invoke(&action, &args(json!({"project": "demo", "limit": "2"}))).await;
        assert_eq!(result.count, Some(2));
    }
}
