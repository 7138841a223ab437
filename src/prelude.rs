// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use hello_phoenix::prelude::*;` to get started quickly.

pub use crate::action::{
    Action, ActionOutput, Arguments, CapabilityDescriptor, InputSchema, InvocationResult,
    ParamSpec, ParamType, Registry, describe, invoke, invoke_value,
};
pub use crate::actions::{
    DeleteTracesAction, GreetingAction, Language, ListProjectsAction, ListTracesAction,
    greeting_actions, trace_store_actions,
};
pub use crate::agent::{
    Agent, Binder, GreetingCase, LlmSelector, Selector, Strategy, StrategyReport, TurnOutcome,
    default_cases, run_strategy,
};
pub use crate::config::Config;
pub use crate::dispatch::{Dispatch, DispatchRequest, dispatch};
pub use crate::error::{ActionError, ConfigError, LlmError, PhoenixError, StoreError};
pub use crate::llm::{
    LlmClient, OpenAIClient, Request, Response, StopReason, ToolCall, ToolDefinition, Usage,
};
pub use crate::store::{
    GraphQlConnector, GraphQlStore, MemoryStore, Project, SpanQuery, StoreConnector, TraceStore,
    TraceSummary,
};
