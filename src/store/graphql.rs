// ABOUTME: GraphQL implementation of TraceStore over reqwest.
// ABOUTME: Posts {query, variables} to <base>/graphql and maps responses to records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{Project, SpanQuery, SpanRecord, StoreConnector, TraceStore};
use crate::error::StoreError;

/// Spans fetched per page when walking a project's spans.
const PAGE_SIZE: u64 = 100;

const PROJECTS_QUERY: &str = r#"
query GetProjects {
    projects {
        edges {
            node {
                id
                name
                createdAt
                traceCount
                recordCount
                tokenCountTotal
            }
        }
    }
}
"#;

const SPANS_QUERY: &str = r#"
query ProjectRootSpans($id: GlobalID!, $first: Int!, $after: String, $filter: String) {
    node(id: $id) {
        ... on Project {
            spans(first: $first, after: $after, rootSpansOnly: true, filterCondition: $filter) {
                edges {
                    node {
                        id
                        context {
                            traceId
                        }
                        name
                        statusCode
                        startTime
                        endTime
                        latencyMs
                        tokenCountTotal
                        tokenCountPrompt
                        tokenCountCompletion
                    }
                }
                pageInfo {
                    hasNextPage
                    endCursor
                }
            }
        }
    }
}
"#;

const CLEAR_PROJECT_MUTATION: &str = r#"
mutation ClearProject($input: ClearProjectInput!) {
    clearProject(input: $input) {
        __typename
    }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
    #[serde(default, rename = "pageInfo")]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    projects: Connection<ProjectNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectNode {
    id: String,
    name: String,
    created_at: Option<String>,
    trace_count: Option<u64>,
    record_count: Option<u64>,
    token_count_total: Option<u64>,
}

impl From<ProjectNode> for Project {
    fn from(node: ProjectNode) -> Self {
        Project {
            name: node.name,
            id: node.id,
            created_at: node.created_at,
            trace_count: node.trace_count,
            record_count: node.record_count,
            token_count_total: node.token_count_total,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NodeData {
    node: Option<ProjectSpans>,
}

#[derive(Debug, Deserialize)]
struct ProjectSpans {
    spans: Option<Connection<SpanNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpanNode {
    id: String,
    context: SpanContext,
    name: Option<String>,
    status_code: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    latency_ms: Option<f64>,
    token_count_total: Option<u64>,
    token_count_prompt: Option<u64>,
    token_count_completion: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpanContext {
    trace_id: String,
}

impl From<SpanNode> for SpanRecord {
    fn from(node: SpanNode) -> Self {
        SpanRecord {
            id: node.id,
            trace_id: node.context.trace_id,
            name: node.name,
            status_code: node.status_code,
            start_time: node.start_time,
            end_time: node.end_time,
            latency_ms: node.latency_ms,
            token_count_total: node.token_count_total,
            token_count_prompt: node.token_count_prompt,
            token_count_completion: node.token_count_completion,
        }
    }
}

/// Map an HTTP status and body to the typed `data` payload.
fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, StoreError> {
    if !(200..300).contains(&status) {
        return Err(StoreError::Api {
            status,
            body: body.to_string(),
        });
    }

    let response: GraphQlResponse = serde_json::from_str(body)?;
    if let Some(first) = response.errors.first() {
        let message = if first.message.is_empty() {
            "Unknown error".to_string()
        } else {
            first.message.clone()
        };
        return Err(StoreError::GraphQl(message));
    }

    let data = response
        .data
        .filter(|d| !d.is_null())
        .ok_or_else(|| StoreError::Shape("response contained no data".to_string()))?;
    serde_json::from_value(data).map_err(|e| StoreError::Shape(e.to_string()))
}

/// Trace store reached over its GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlStore {
    base_url: String,
    http: reqwest::Client,
}

impl GraphQlStore {
    /// Create a store for `base_url` using an existing HTTP client.
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// The full GraphQL endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T, StoreError> {
        let endpoint = self.endpoint();
        tracing::debug!(operation, %endpoint, "graphql request");

        let response = self
            .http
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        decode(status, &body)
    }
}

#[async_trait]
impl TraceStore for GraphQlStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let data: ProjectsData = self.execute("GetProjects", PROJECTS_QUERY, None).await?;
        Ok(data
            .projects
            .edges
            .into_iter()
            .map(|e| Project::from(e.node))
            .collect())
    }

    async fn root_spans(
        &self,
        project_id: &str,
        query: &SpanQuery,
    ) -> Result<Vec<SpanRecord>, StoreError> {
        let mut spans = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let remaining = query.limit.map(|l| l.saturating_sub(spans.len() as u64));
            if remaining == Some(0) {
                break;
            }
            let first = remaining.map_or(PAGE_SIZE, |r| r.min(PAGE_SIZE));

            let variables = json!({
                "id": project_id,
                "first": first,
                "after": after,
                "filter": query.filter,
            });
            let data: NodeData = self
                .execute("ProjectRootSpans", SPANS_QUERY, Some(variables))
                .await?;

            let connection = data
                .node
                .and_then(|n| n.spans)
                .ok_or_else(|| StoreError::Shape(format!("project '{}' has no spans field", project_id)))?;

            let page_len = connection.edges.len();
            spans.extend(connection.edges.into_iter().map(|e| SpanRecord::from(e.node)));

            match connection.page_info {
                Some(PageInfo {
                    has_next_page: true,
                    end_cursor: Some(cursor),
                }) if page_len > 0 => after = Some(cursor),
                _ => break,
            }
        }

        Ok(spans)
    }

    async fn clear_project(&self, project_id: &str) -> Result<(), StoreError> {
        let variables = json!({ "input": { "id": project_id } });
        let _: Value = self
            .execute("ClearProject", CLEAR_PROJECT_MUTATION, Some(variables))
            .await?;
        Ok(())
    }
}

/// Builds GraphQL stores, defaulting to the configured base URL.
///
/// Nothing is set up until `connect`, so building the registry (and
/// describing its actions) cannot fail on HTTP client setup.
#[derive(Debug, Clone)]
pub struct GraphQlConnector {
    default_base_url: String,
    timeout: Duration,
}

impl GraphQlConnector {
    /// Create a connector with a request timeout.
    pub fn new(default_base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            default_base_url: default_base_url.into(),
            timeout,
        }
    }
}

impl StoreConnector for GraphQlConnector {
    fn connect(&self, endpoint: Option<&str>) -> Result<Arc<dyn TraceStore>, StoreError> {
        let base = endpoint.unwrap_or(&self.default_base_url);
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(Arc::new(GraphQlStore::new(base, http)))
    }
}
