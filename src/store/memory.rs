// ABOUTME: In-process TraceStore fixture with request counting and failure
// ABOUTME: injection, for tests and for running actions without a server.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{Project, SpanQuery, SpanRecord, StoreConnector, TraceStore};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    projects: Vec<(Project, Vec<SpanRecord>)>,
    requests: usize,
    failure: Option<String>,
}

/// A trace store held in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project holding `traces` synthetic traces of one root span each.
    pub fn with_project(self, name: &str, traces: usize) -> Self {
        let id = format!("project-{}", name);
        let spans = (0..traces)
            .map(|i| SpanRecord {
                id: format!("{}-span-{}", name, i),
                trace_id: format!("{}-trace-{}", name, i),
                name: Some(format!("greeting-{}", i)),
                status_code: Some("OK".to_string()),
                start_time: Some(format!("2025-01-01T00:00:{:02}Z", i % 60)),
                end_time: None,
                latency_ms: Some(10.0 + i as f64),
                token_count_total: Some(42),
                token_count_prompt: Some(30),
                token_count_completion: Some(12),
            })
            .collect();
        let project = Project {
            name: name.to_string(),
            id,
            created_at: Some("2025-01-01T00:00:00Z".to_string()),
            trace_count: None,
            record_count: None,
            token_count_total: None,
        };
        self.lock().projects.push((project, spans));
        self
    }

    /// Make every subsequent request fail with a GraphQL error.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Number of requests served (including failed ones).
    pub fn requests(&self) -> usize {
        self.lock().requests
    }

    /// Current trace count of a project, if it exists.
    pub fn trace_count(&self, name: &str) -> Option<usize> {
        self.lock()
            .projects
            .iter()
            .find(|(p, _)| p.name == name)
            .map(|(_, spans)| spans.len())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panicking test thread must not poison the fixture for others.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, State>, StoreError> {
        let mut state = self.lock();
        state.requests += 1;
        if let Some(message) = state.failure.clone() {
            return Err(StoreError::GraphQl(message));
        }
        Ok(state)
    }
}

#[async_trait]
impl TraceStore for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let state = self.begin()?;
        Ok(state
            .projects
            .iter()
            .map(|(project, spans)| Project {
                trace_count: Some(spans.len() as u64),
                record_count: Some(spans.len() as u64),
                token_count_total: Some(spans.iter().filter_map(|s| s.token_count_total).sum()),
                ..project.clone()
            })
            .collect())
    }

    async fn root_spans(
        &self,
        project_id: &str,
        query: &SpanQuery,
    ) -> Result<Vec<SpanRecord>, StoreError> {
        let state = self.begin()?;
        let (_, spans) = state
            .projects
            .iter()
            .find(|(p, _)| p.id == project_id)
            .ok_or_else(|| StoreError::GraphQl(format!("node '{}' not found", project_id)))?;

        let cap = query
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(spans
            .iter()
            .filter(|s| match &query.filter {
                Some(f) => s.name.as_deref().is_some_and(|n| n.contains(f.as_str())),
                None => true,
            })
            .take(cap)
            .cloned()
            .collect())
    }

    async fn clear_project(&self, project_id: &str) -> Result<(), StoreError> {
        let mut state = self.begin()?;
        let (_, spans) = state
            .projects
            .iter_mut()
            .find(|(p, _)| p.id == project_id)
            .ok_or_else(|| StoreError::GraphQl(format!("node '{}' not found", project_id)))?;
        spans.clear();
        Ok(())
    }
}

impl StoreConnector for MemoryStore {
    fn connect(&self, _endpoint: Option<&str>) -> Result<Arc<dyn TraceStore>, StoreError> {
        Ok(Arc::new(self.clone()))
    }
}
