// ABOUTME: Defines the TraceStore trait - the read/clear surface of the external
// ABOUTME: trace store - and StoreConnector, which picks the endpoint per call.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Project, SpanQuery, SpanRecord};
use crate::error::StoreError;

/// Operations the actions need from the trace store.
#[async_trait]
pub trait TraceStore: Send + Sync {
    /// All projects with their aggregate counts.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Find a project by exact name.
    async fn find_project(&self, name: &str) -> Result<Option<Project>, StoreError> {
        Ok(self
            .list_projects()
            .await?
            .into_iter()
            .find(|p| p.name == name))
    }

    /// Root spans of a project, newest first, one per trace.
    async fn root_spans(
        &self,
        project_id: &str,
        query: &SpanQuery,
    ) -> Result<Vec<SpanRecord>, StoreError>;

    /// Remove every trace of a project while keeping the project itself.
    async fn clear_project(&self, project_id: &str) -> Result<(), StoreError>;
}

/// Produces a store for an optional per-call endpoint override.
pub trait StoreConnector: Send + Sync {
    /// Connect to `endpoint`, or the configured default when `None`.
    fn connect(&self, endpoint: Option<&str>) -> Result<Arc<dyn TraceStore>, StoreError>;
}
