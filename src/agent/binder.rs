// ABOUTME: Binder - offers every registered action to the model as a tool definition.
// ABOUTME: It never ranks, filters or looks up actions by name.

use crate::action::Registry;
use crate::llm::ToolDefinition;

/// Projects the registry into model tool definitions.
pub struct Binder<'a> {
    registry: &'a Registry,
}

impl<'a> Binder<'a> {
    /// Bind over a registry.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// One definition per registered action, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .all()
            .iter()
            .map(|a| ToolDefinition {
                name: a.name().to_string(),
                description: a.description().to_string(),
                input_schema: a.inputs().to_json_schema(),
            })
            .collect()
    }
}
