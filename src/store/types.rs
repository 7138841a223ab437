// ABOUTME: Records read from the trace store - projects, spans, and the
// ABOUTME: per-trace summaries produced by grouping spans.

use serde::{Deserialize, Serialize};

/// A project in the trace store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub id: String,
    pub created_at: Option<String>,
    pub trace_count: Option<u64>,
    pub record_count: Option<u64>,
    pub token_count_total: Option<u64>,
}

/// A span as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub id: String,
    pub trace_id: String,
    pub name: Option<String>,
    pub status_code: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub latency_ms: Option<f64>,
    pub token_count_total: Option<u64>,
    pub token_count_prompt: Option<u64>,
    pub token_count_completion: Option<u64>,
}

/// One row of a trace listing: the first span seen for a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub trace_id: String,
    pub first_span_name: Option<String>,
    pub start_time: Option<String>,
    pub latency_ms: Option<f64>,
    pub token_count_total: Option<u64>,
    pub status_code: Option<String>,
}

impl From<&SpanRecord> for TraceSummary {
    fn from(span: &SpanRecord) -> Self {
        Self {
            trace_id: span.trace_id.clone(),
            first_span_name: span.name.clone(),
            start_time: span.start_time.clone(),
            latency_ms: span.latency_ms,
            token_count_total: span.token_count_total,
            status_code: span.status_code.clone(),
        }
    }
}

/// Bounds for a span listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanQuery {
    /// Maximum number of spans to return; `None` means all.
    pub limit: Option<u64>,

    /// Store-side filter condition, passed through verbatim.
    pub filter: Option<String>,
}

/// Collapse spans to one summary per trace, keeping the first span of each
/// trace in input order, and cap at `limit` traces.
pub fn summarize_traces(spans: &[SpanRecord], limit: Option<u64>) -> Vec<TraceSummary> {
    let mut seen = std::collections::HashSet::new();
    let cap = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

    spans
        .iter()
        .filter(|s| !s.trace_id.is_empty() && seen.insert(s.trace_id.clone()))
        .take(cap)
        .map(TraceSummary::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(id: &str, trace: &str) -> SpanRecord {
        SpanRecord {
            id: id.into(),
            trace_id: trace.into(),
            name: Some(format!("span-{id}")),
            status_code: Some("OK".into()),
            start_time: None,
            end_time: None,
            latency_ms: Some(1.5),
            token_count_total: Some(10),
            token_count_prompt: None,
            token_count_completion: None,
        }
    }

    #[test]
    fn test_groups_by_trace_keeping_first() {
        let spans = vec![span("1", "a"), span("2", "a"), span("3", "b")];
        let traces = summarize_traces(&spans, None);
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].trace_id, "a");
        assert_eq!(traces[0].first_span_name.as_deref(), Some("span-1"));
        assert_eq!(traces[1].trace_id, "b");
    }

    #[test]
    fn test_limit_caps_traces() {
        let spans: Vec<_> = (0..5).map(|i| span(&i.to_string(), &format!("t{i}"))).collect();
        assert_eq!(summarize_traces(&spans, Some(3)).len(), 3);
        assert_eq!(summarize_traces(&spans, Some(0)).len(), 0);
    }

    #[test]
    fn test_skips_spans_without_trace_id() {
        let spans = vec![span("1", ""), span("2", "a")];
        let traces = summarize_traces(&spans, None);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].trace_id, "a");
    }
}
