// ABOUTME: Greeter demo - runs the greeting agent with the fan-out and/or
// ABOUTME: single-pass strategy and prints what each one cost.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use secrecy::SecretString;

use hello_phoenix::prelude::*;
use hello_phoenix::telemetry::{self, LogFormat, SpanExport};

/// Multi-tool greeting agent
#[derive(Parser, Debug)]
#[command(name = "greeter", version, about)]
struct Cli {
    /// Model to bind the greeting actions to (overrides OPENAI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Mode {
    /// One model call per greeting
    FanOut,
    /// One model call for all greetings
    SinglePass,
    /// Run both and print a comparison
    Compare,
}

impl Mode {
    /// Phoenix project the run's spans are filed under. A comparison run shares
    /// one project; its `strategy` spans tell the two apart.
    fn project(self) -> &'static str {
        match self {
            Mode::FanOut => Strategy::FanOut.project_name(),
            Mode::SinglePass => Strategy::SinglePass.project_name(),
            Mode::Compare => "hello-phoenix",
        }
    }

    fn strategies(self) -> &'static [Strategy] {
        match self {
            Mode::FanOut => &[Strategy::FanOut],
            Mode::SinglePass => &[Strategy::SinglePass],
            Mode::Compare => &[Strategy::FanOut, Strategy::SinglePass],
        }
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

    // Missing credentials are fatal before any action runs.
    let config = Config::from_env()?;
    let api_key = config.require_openai_key()?;

    let telemetry = telemetry::init(
        "info",
        format,
        Some(SpanExport {
            endpoint: &config.collector_endpoint,
            project: cli.command.project(),
        }),
    )?;
    let result = run(&cli, &config, api_key).await;
    telemetry.shutdown();
    result
}

async fn run(cli: &Cli, config: &Config, api_key: SecretString) -> Result<()> {
    let model = cli.model.clone().unwrap_or_else(|| config.model.clone());

    let client = OpenAIClient::new(api_key).with_base_url(&config.openai_base_url);
    let selector = LlmSelector::new(Arc::new(client), model.clone());

    let mut registry = Registry::new();
    registry.extend(greeting_actions())?;
    let agent = Agent::new(Arc::new(registry), Arc::new(selector));
    tracing::info!(agent_id = agent.agent_id(), model = %model, "agent ready");

    let cases = default_cases();
    let mut reports = Vec::new();
    for &strategy in cli.command.strategies() {
        println!("{} (project {})", strategy, cli.command.project());
        println!("{}", "-".repeat(50));

        let report = run_strategy(&agent, strategy, &cases).await?;
        print_turns(&report);
        reports.push(report);
        println!();
    }

    if reports.len() > 1 {
        print_comparison(&reports);
    }

    println!("View traces at: {}", config.phoenix_host);
    Ok(())
}

fn print_turns(report: &StrategyReport) {
    for turn in &report.turns {
        println!("Prompt: {}", turn.goal.replace('\n', "\n        "));
        if turn.outcomes.is_empty() && !turn.text.is_empty() {
            println!("  (no action selected) {}", turn.text);
        }
        for outcome in &turn.outcomes {
            if outcome.result.success {
                let data = &outcome.result.data;
                let shown = data.as_str().map(str::to_string).unwrap_or_else(|| data.to_string());
                println!("  {} -> {}", outcome.call.name, shown);
            } else {
                println!("  {} failed: {}", outcome.call.name, outcome.result.message);
            }
        }
    }
}

fn print_comparison(reports: &[StrategyReport]) {
    println!(
        "{:<12} {:>11} {:>8} {:>8} {:>10} {:>10}",
        "strategy", "model calls", "actions", "failed", "prompt tk", "output tk"
    );
    for r in reports {
        println!(
            "{:<12} {:>11} {:>8} {:>8} {:>10} {:>10}",
            r.strategy.to_string(),
            r.model_calls,
            r.actions_invoked,
            r.actions_failed,
            r.input_tokens,
            r.output_tokens
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_strategy_modes_use_their_projects() {
        assert_eq!(Mode::FanOut.project(), "multi-call-greeter");
        assert_eq!(Mode::SinglePass.project(), "single-call-greeter");
        assert_eq!(Mode::Compare.project(), "hello-phoenix");
    }

    #[test]
    fn test_compare_runs_both_strategies_in_order() {
        assert_eq!(
            Mode::Compare.strategies(),
            &[Strategy::FanOut, Strategy::SinglePass]
        );
        let cli = Cli::try_parse_from(["greeter", "single-pass", "--model", "gpt-4o-mini"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cli.command.strategies(), &[Strategy::SinglePass]);
    }
}
