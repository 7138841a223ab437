// ABOUTME: DeleteTracesAction - clears every trace of a project, keeping the
// ABOUTME: project itself. Destructive: inert unless the caller confirms.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{connect, endpoint_param, project_param, resolve_project};
use crate::action::{Action, ActionOutput, Arguments, CONFIRM_ARG, InputSchema, ParamSpec};
use crate::error::ActionError;
use crate::store::StoreConnector;

/// Deletes all traces from a project.
pub struct DeleteTracesAction {
    connector: Arc<dyn StoreConnector>,
}

impl DeleteTracesAction {
    /// Create the action over a store connector.
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl Action for DeleteTracesAction {
    fn name(&self) -> &str {
        "delete_traces"
    }

    fn description(&self) -> &str {
        "Deletes all traces from the specified Phoenix project using GraphQL API (keeps project intact)"
    }

    fn inputs(&self) -> InputSchema {
        InputSchema::new()
            .param(project_param())
            .param(endpoint_param())
            .param(
                ParamSpec::boolean(CONFIRM_ARG, "Must be true to actually delete traces")
                    .optional(),
            )
    }

    fn outputs(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("success", "boolean"),
            ("message", "string"),
            ("data", "object"),
            ("count", "integer"),
        ]
    }

    fn requires_confirmation(&self) -> bool {
        true
    }

    async fn execute(&self, args: &Arguments) -> Result<ActionOutput, ActionError> {
        let project_name = args.string("project")?;
        let store = connect(self.connector.as_ref(), args)?;
        let project = resolve_project(store.as_ref(), &project_name).await?;

        let trace_count = project.trace_count.unwrap_or(0);
        if trace_count == 0 {
            return Ok(ActionOutput::new(
                format!("No traces found in project '{}'", project_name),
                json!({ "project": project_name, "deleted_count": 0 }),
            )
            .with_count(0));
        }

        // A failure here may leave the project partially cleared; the store does
        // not report how far it got.
        store.clear_project(&project.id).await?;
        tracing::info!(project = %project_name, trace_count, "cleared project traces");

        Ok(ActionOutput::new(
            format!(
                "Successfully deleted {} traces from project '{}'",
                trace_count, project_name
            ),
            json!({ "project": project_name, "deleted_count": trace_count }),
        )
        .with_count(usize::try_from(trace_count).unwrap_or(usize::MAX)))
    }
}
