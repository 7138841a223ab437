// ABOUTME: Orchestration strategies compared by the demo: fan-out (one model
// ABOUTME: call per greeting) and single-pass (one model call for all greetings).

use std::fmt;

use serde::Serialize;
use tracing::Instrument;

use super::{Agent, TurnOutcome};
use crate::actions::Language;
use crate::error::LlmError;
use crate::llm::Usage;

/// A person to greet and the language to do it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingCase {
    pub person: String,
    pub language: Language,
}

impl GreetingCase {
    pub fn new(person: impl Into<String>, language: Language) -> Self {
        Self {
            person: person.into(),
            language,
        }
    }
}

/// Alice in English, Bob in Spanish, Chen in Mandarin, David in Hebrew.
pub fn default_cases() -> Vec<GreetingCase> {
    vec![
        GreetingCase::new("Alice", Language::English),
        GreetingCase::new("Bob", Language::Spanish),
        GreetingCase::new("Chen", Language::Mandarin),
        GreetingCase::new("David", Language::Hebrew),
    ]
}

/// How the greetings are spread over model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    FanOut,
    SinglePass,
}

impl Strategy {
    /// Trace store project the strategy's traces are filed under.
    pub fn project_name(&self) -> &'static str {
        match self {
            Strategy::FanOut => "multi-call-greeter",
            Strategy::SinglePass => "single-call-greeter",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FanOut => write!(f, "fan-out"),
            Strategy::SinglePass => write!(f, "single-pass"),
        }
    }
}

/// Prompt for a single case. Phrasing alternates the way a person would ask.
pub fn case_prompt(index: usize, case: &GreetingCase) -> String {
    if index % 2 == 0 {
        format!("Say hello to {} in {}", case.person, case.language.label())
    } else {
        format!("Greet {} in {}", case.person, case.language.label())
    }
}

/// One prompt asking for every case at once.
pub fn combined_prompt(cases: &[GreetingCase]) -> String {
    let mut prompt =
        String::from("Please greet the following people in their respective languages:\n");
    for (i, case) in cases.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} in {}\n",
            i + 1,
            case.person,
            case.language.label()
        ));
    }
    prompt.push_str("\nUse the appropriate greeting tool for each person.");
    prompt
}

/// What a strategy cost and produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub strategy: Strategy,
    /// One per agent turn; each turn makes exactly one selection.
    pub model_calls: usize,
    pub actions_invoked: usize,
    pub actions_failed: usize,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub greetings: Vec<String>,
    #[serde(skip)]
    pub turns: Vec<TurnOutcome>,
}

impl StrategyReport {
    fn from_turns(strategy: Strategy, turns: Vec<TurnOutcome>) -> Self {
        let mut usage = Usage::default();
        let mut actions_invoked = 0;
        let mut actions_failed = 0;
        let mut greetings = Vec::new();

        for turn in &turns {
            usage += turn.usage;
            actions_invoked += turn.outcomes.len();
            actions_failed += turn.outcomes.iter().filter(|o| !o.result.success).count();
            greetings.extend(turn.greetings());
        }

        Self {
            strategy,
            model_calls: turns.len(),
            actions_invoked,
            actions_failed,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            greetings,
            turns,
        }
    }

    /// Prompt plus completion tokens across all calls.
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Run `cases` through `agent` using `strategy`.
pub async fn run_strategy(
    agent: &Agent,
    strategy: Strategy,
    cases: &[GreetingCase],
) -> Result<StrategyReport, LlmError> {
    let span = tracing::info_span!(
        "strategy",
        openinference.span.kind = "CHAIN",
        strategy = %strategy,
        project = strategy.project_name(),
        cases = cases.len(),
    );

    async {
        let mut turns = Vec::new();
        match strategy {
            Strategy::FanOut => {
                for (i, case) in cases.iter().enumerate() {
                    turns.push(agent.run(&case_prompt(i, case)).await?);
                }
            }
            Strategy::SinglePass => {
                if !cases.is_empty() {
                    turns.push(agent.run(&combined_prompt(cases)).await?);
                }
            }
        }

        let report = StrategyReport::from_turns(strategy, turns);
        tracing::info!(
            model_calls = report.model_calls,
            actions_invoked = report.actions_invoked,
            total_tokens = report.total_tokens(),
            "strategy finished"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::action::Registry;
    use crate::actions::greeting_actions;
    use crate::agent::LlmSelector;
    use crate::llm::ToolCall;
    use crate::testing::{SCRIPTED_USAGE, ScriptedClient};

    #[test]
    fn test_case_prompts_alternate() {
        let cases = default_cases();
        assert_eq!(case_prompt(0, &cases[0]), "Say hello to Alice in English");
        assert_eq!(case_prompt(1, &cases[1]), "Greet Bob in Spanish");
    }

    #[test]
    fn test_combined_prompt_lists_everyone() {
        let prompt = combined_prompt(&default_cases());
        assert!(prompt.contains("1. Alice in English"));
        assert!(prompt.contains("4. David in Hebrew"));
        assert!(prompt.ends_with("Use the appropriate greeting tool for each person."));
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(Strategy::FanOut.to_string(), "fan-out");
        assert_eq!(Strategy::SinglePass.project_name(), "single-call-greeter");
        assert_eq!(
            serde_json::to_value(Strategy::SinglePass).unwrap(),
            serde_json::json!("single-pass")
        );
    }

    fn agent_for(client: Arc<ScriptedClient>) -> Agent {
        let mut registry = Registry::new();
        registry.extend(greeting_actions()).unwrap();
        Agent::new(Arc::new(registry), Arc::new(LlmSelector::new(client, "m")))
    }

    fn call(id: &str, action: &str, person: &str) -> ToolCall {
        ToolCall::new(id, action, json!({ "name": person }))
    }

    #[tokio::test]
    async fn test_fan_out_makes_one_call_per_case() {
        let client = Arc::new(
            ScriptedClient::new()
                .respond_with(vec![call("1", "hello_english", "Alice")])
                .respond_with(vec![call("2", "hello_spanish", "Bob")])
                .respond_with(vec![call("3", "hello_mandarin", "Chen")])
                .respond_with(vec![call("4", "hello_hebrew", "David")]),
        );
        let agent = agent_for(client.clone());

        let report = run_strategy(&agent, Strategy::FanOut, &default_cases())
            .await
            .unwrap();

        assert_eq!(client.calls(), 4);
        assert_eq!(report.model_calls, 4);
        assert_eq!(report.actions_invoked, 4);
        assert_eq!(report.actions_failed, 0);
        assert_eq!(report.input_tokens, 4 * SCRIPTED_USAGE.input_tokens);
        assert_eq!(
            report.greetings,
            vec!["Hello Alice", "Hola Bob", "你好 Chen", "שלום David"]
        );
    }

    #[tokio::test]
    async fn test_single_pass_makes_one_call() {
        let client = Arc::new(ScriptedClient::new().respond_with(vec![
            call("1", "hello_english", "Alice"),
            call("2", "hello_spanish", "Bob"),
            call("3", "hello_mandarin", "Chen"),
            call("4", "hello_hebrew", "David"),
        ]));
        let agent = agent_for(client.clone());

        let report = run_strategy(&agent, Strategy::SinglePass, &default_cases())
            .await
            .unwrap();

        assert_eq!(client.calls(), 1);
        assert_eq!(report.model_calls, 1);
        assert_eq!(report.actions_invoked, 4);
        assert_eq!(report.total_tokens(), SCRIPTED_USAGE.total());
        assert_eq!(report.greetings.len(), 4);
    }

    #[tokio::test]
    async fn test_single_pass_with_no_cases_skips_model() {
        let client = Arc::new(ScriptedClient::new());
        let agent = agent_for(client.clone());

        let report = run_strategy(&agent, Strategy::SinglePass, &[]).await.unwrap();
        assert_eq!(client.calls(), 0);
        assert!(report.greetings.is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_stops_on_model_error() {
        let client =
            Arc::new(ScriptedClient::new().respond_with(vec![call("1", "hello_english", "Alice")]));
        let agent = agent_for(client.clone());

        let err = run_strategy(&agent, Strategy::FanOut, &default_cases()).await;
        assert!(err.is_err());
        assert_eq!(client.calls(), 2);
    }
}
