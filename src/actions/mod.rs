// ABOUTME: Built-in actions: four greetings for the agent, and trace store
// ABOUTME: management (list projects, list traces, delete traces) for operators.

mod delete_traces;
mod greetings;
mod list_projects;
mod list_traces;

use std::sync::Arc;

pub use delete_traces::DeleteTracesAction;
pub use greetings::{GreetingAction, Language, greeting_actions};
pub use list_projects::ListProjectsAction;
pub use list_traces::ListTracesAction;

use crate::action::{Action, Arguments, ParamSpec};
use crate::error::ActionError;
use crate::store::{Project, StoreConnector, TraceStore};

/// All trace store actions sharing one connector.
pub fn trace_store_actions(connector: Arc<dyn StoreConnector>) -> Vec<Arc<dyn Action>> {
    vec![
        Arc::new(ListProjectsAction::new(Arc::clone(&connector))),
        Arc::new(ListTracesAction::new(Arc::clone(&connector))),
        Arc::new(DeleteTracesAction::new(connector)),
    ]
}

fn project_param() -> ParamSpec {
    ParamSpec::string("project", "Name of the Phoenix project").non_empty()
}

fn endpoint_param() -> ParamSpec {
    ParamSpec::string(
        "endpoint",
        "Phoenix server endpoint (default: from PHOENIX_HOST env)",
    )
    .optional()
}

fn connect(
    connector: &dyn StoreConnector,
    args: &Arguments,
) -> Result<Arc<dyn TraceStore>, ActionError> {
    Ok(connector.connect(args.str("endpoint"))?)
}

async fn resolve_project(store: &dyn TraceStore, name: &str) -> Result<Project, ActionError> {
    store
        .find_project(name)
        .await?
        .ok_or_else(|| ActionError::not_found(format!("Project '{}' not found", name)))
}
