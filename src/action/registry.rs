// ABOUTME: Implements the Registry - the authoritative name -> Action mapping,
// ABOUTME: built once at startup and shared by the binder and the dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use super::Action;
use crate::agent::Binder;
use crate::error::ActionError;
use crate::llm::ToolDefinition;

/// An ordered collection of actions keyed by name.
#[derive(Default, Clone)]
pub struct Registry {
    actions: Vec<Arc<dyn Action>>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Names must be unique.
    pub fn register<A: Action + 'static>(&mut self, action: A) -> Result<(), ActionError> {
        self.register_arc(Arc::new(action))
    }

    /// Register an action from an Arc.
    pub fn register_arc(&mut self, action: Arc<dyn Action>) -> Result<(), ActionError> {
        let name = action.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ActionError::Duplicate(name));
        }
        self.index.insert(name, self.actions.len());
        self.actions.push(action);
        Ok(())
    }

    /// Register several actions, stopping at the first duplicate.
    pub fn extend(
        &mut self,
        actions: impl IntoIterator<Item = Arc<dyn Action>>,
    ) -> Result<(), ActionError> {
        for action in actions {
            self.register_arc(action)?;
        }
        Ok(())
    }

    /// Get an action by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.index.get(name).map(|&i| Arc::clone(&self.actions[i]))
    }

    /// Get an action by name, or a NotFound error.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Action>, ActionError> {
        self.get(name)
            .ok_or_else(|| ActionError::not_found(format!("Unknown action '{}'", name)))
    }

    /// All actions in registration order.
    pub fn all(&self) -> &[Arc<dyn Action>] {
        &self.actions
    }

    /// All action names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Tool definitions for every action, for binding to a model.
    pub fn to_definitions(&self) -> Vec<ToolDefinition> {
        Binder::new(self).definitions()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("actions", &self.names())
            .finish()
    }
}
