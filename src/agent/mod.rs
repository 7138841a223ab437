// ABOUTME: Agent module - binds actions to a model, runs what it selects, and
// ABOUTME: drives the fan-out and single-pass orchestration strategies.

mod binder;
mod runner;
mod selector;
mod strategy;

pub use binder::Binder;
pub use runner::{Agent, CallOutcome, TurnOutcome};
pub use selector::{ActionCall, GREETING_SYSTEM_PROMPT, LlmSelector, Selection, Selector};
pub use strategy::{
    GreetingCase, Strategy, StrategyReport, case_prompt, combined_prompt, default_cases,
    run_strategy,
};
