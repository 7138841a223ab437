// ABOUTME: ListProjectsAction - enumerates trace store projects with their
// ABOUTME: trace, record and token totals.

use std::sync::Arc;

use async_trait::async_trait;

use super::{connect, endpoint_param};
use crate::action::{Action, ActionOutput, Arguments, InputSchema};
use crate::error::ActionError;
use crate::store::StoreConnector;

/// Lists all projects in the trace store.
pub struct ListProjectsAction {
    connector: Arc<dyn StoreConnector>,
}

impl ListProjectsAction {
    /// Create the action over a store connector.
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl Action for ListProjectsAction {
    fn name(&self) -> &str {
        "list_projects"
    }

    fn description(&self) -> &str {
        "Lists all available Phoenix projects"
    }

    fn inputs(&self) -> InputSchema {
        InputSchema::new().param(endpoint_param())
    }

    fn outputs(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("success", "boolean"),
            ("message", "string"),
            ("data", "array"),
            ("count", "integer"),
        ]
    }

    async fn execute(&self, args: &Arguments) -> Result<ActionOutput, ActionError> {
        let store = connect(self.connector.as_ref(), args)?;
        let projects = store.list_projects().await?;

        let message = if projects.is_empty() {
            "No projects found".to_string()
        } else {
            format!("Found {} projects", projects.len())
        };
        let data = serde_json::to_value(&projects).map_err(|e| ActionError::Execution(e.into()))?;
        Ok(ActionOutput::new(message, data))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;
    use crate::action::invoke;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_lists_projects() {
        let store = MemoryStore::new()
            .with_project("default", 2)
            .with_project("hello-phoenix", 5);
        let action = ListProjectsAction::new(Arc::new(store.clone()));

        let result = invoke(&action, &Map::new()).await;
        assert!(result.success);
        assert_eq!(result.message, "Found 2 projects");
        assert_eq!(result.count, Some(2));
        assert_eq!(result.data[1]["name"], "hello-phoenix");
        assert_eq!(result.data[1]["trace_count"], 5);
        assert_eq!(store.requests(), 1);
    }

    #[tokio::test]
    async fn test_no_projects() {
        let action = ListProjectsAction::new(Arc::new(MemoryStore::new()));
        let result = invoke(&action, &Map::new()).await;
        assert!(result.success);
        assert_eq!(result.message, "No projects found");
        assert_eq!(result.data, json!([]));
        assert_eq!(result.count, Some(0));
    }

    #[tokio::test]
    async fn test_remote_error() {
        let store = MemoryStore::new();
        store.fail_with("server unavailable");
        let action = ListProjectsAction::new(Arc::new(store));

        let result = invoke(&action, &Map::new()).await;
        assert!(!result.success);
        assert_eq!(result.message, "GraphQL error: server unavailable");
    }
}
