// ABOUTME: Operator CLI over the trace store actions. Parses flags, builds the
// ABOUTME: registry, hands off to the dispatcher, prints JSON and exits.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

use hello_phoenix::actions::trace_store_actions;
use hello_phoenix::config::{DEFAULT_PHOENIX_HOST, DEFAULT_TIMEOUT_SECS};
use hello_phoenix::dispatch::{DispatchRequest, dispatch};
use hello_phoenix::prelude::*;
use hello_phoenix::telemetry::{self, LogFormat};

/// Phoenix trace store tools
#[derive(Parser, Debug)]
#[command(name = "phoenix-tools", version, about)]
struct Cli {
    /// Print the capability descriptor and exit without doing anything
    #[arg(long, global = true)]
    context: bool,

    /// Phoenix server endpoint (overrides PHOENIX_HOST)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all projects
    ListProjects,
    /// List traces in a project
    ListTraces(ListTracesArgs),
    /// Delete every trace in a project, keeping the project
    DeleteTraces(DeleteTracesArgs),
}

#[derive(Args, Debug)]
struct ListTracesArgs {
    /// Project name
    #[arg(long)]
    project: Option<String>,

    /// Maximum number of traces to return. Checked by the action's schema so
    /// a bad value is reported as JSON like any other validation failure.
    #[arg(long, allow_hyphen_values = true)]
    limit: Option<String>,

    /// Filter condition forwarded to the trace store
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Args, Debug)]
struct DeleteTracesArgs {
    /// Project name
    #[arg(long)]
    project: Option<String>,

    /// Confirm the deletion
    #[arg(long)]
    confirm: bool,
}

impl Command {
    fn action_name(&self) -> &'static str {
        match self {
            Command::ListProjects => "list_projects",
            Command::ListTraces(_) => "list_traces",
            Command::DeleteTraces(_) => "delete_traces",
        }
    }

    /// Raw arguments for the invoker. Only flags the user gave are passed, so
    /// a missing `--project` is reported by schema validation.
    fn arguments(&self) -> Map<String, Value> {
        let mut args = Map::new();
        match self {
            Command::ListProjects => {}
            Command::ListTraces(a) => {
                if let Some(project) = &a.project {
                    args.insert("project".into(), project.clone().into());
                }
                if let Some(limit) = &a.limit {
                    args.insert("limit".into(), limit.clone().into());
                }
                if let Some(filter) = &a.filter {
                    args.insert("filter".into(), filter.clone().into());
                }
            }
            Command::DeleteTraces(a) => {
                if let Some(project) = &a.project {
                    args.insert("project".into(), project.clone().into());
                }
                if a.confirm {
                    args.insert("confirm".into(), true.into());
                }
            }
        }
        args
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    // Logs only; operator commands are not traced to Phoenix.
    let _telemetry = telemetry::init("warn", format, None)?;

    // Describing never reaches the store; configuration is not loaded.
    let connector = if cli.context {
        GraphQlConnector::new(
            DEFAULT_PHOENIX_HOST,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    } else {
        let mut config = Config::from_env()?;
        if let Some(endpoint) = &cli.endpoint {
            config = config.with_phoenix_host(endpoint);
        }
        tracing::debug!(phoenix_host = %config.phoenix_host, "configuration loaded");
        GraphQlConnector::new(&config.phoenix_host, config.timeout)
    };

    let mut registry = Registry::new();
    registry.extend(trace_store_actions(Arc::new(connector)))?;

    let request = DispatchRequest {
        arguments: cli.command.arguments(),
        context: cli.context,
    };
    let outcome = dispatch(&registry, cli.command.action_name(), request).await;

    println!("{}", outcome.render());
    if outcome.exit_code != 0 {
        std::process::exit(outcome.exit_code);
    }
    Ok(())
}
