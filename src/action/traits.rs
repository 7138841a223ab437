// ABOUTME: Defines the Action trait - a named, schema-described unit of work.
// ABOUTME: Actions declare inputs/outputs as data and run an async effect.

use async_trait::async_trait;

use super::{ActionOutput, Arguments, InputSchema};
use crate::error::ActionError;

/// An operation exposed to models and to the command line.
#[async_trait]
pub trait Action: Send + Sync {
    /// Returns the unique name of this action.
    fn name(&self) -> &str;

    /// Returns a human-readable description, shown to models and operators.
    fn description(&self) -> &str;

    /// Declared input parameters.
    fn inputs(&self) -> InputSchema;

    /// Declared output fields as `(field, type)` pairs.
    fn outputs(&self) -> Vec<(&'static str, &'static str)>;

    /// Destructive actions return true; the invoker then refuses to run them
    /// unless the caller set the `confirm` argument.
    fn requires_confirmation(&self) -> bool {
        false
    }

    /// Run the effect. Only ever called with arguments that passed validation.
    async fn execute(&self, args: &Arguments) -> Result<ActionOutput, ActionError>;
}
