// ABOUTME: GreetingAction - greets a person in one of four languages.
// ABOUTME: Pure local computation; the demo agent's model-facing actions.

use std::sync::Arc;

use async_trait::async_trait;

use crate::action::{Action, ActionOutput, Arguments, InputSchema, ParamSpec};
use crate::error::ActionError;

/// Languages the greeter knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    Mandarin,
    Hebrew,
}

impl Language {
    /// Every supported language, in demo order.
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::Mandarin,
        Language::Hebrew,
    ];

    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Mandarin => "Mandarin",
            Language::Hebrew => "Hebrew",
        }
    }

    /// Name of the action that produces this greeting.
    pub fn action_name(&self) -> &'static str {
        match self {
            Language::English => "hello_english",
            Language::Spanish => "hello_spanish",
            Language::Mandarin => "hello_mandarin",
            Language::Hebrew => "hello_hebrew",
        }
    }

    /// The greeting word.
    pub fn salutation(&self) -> &'static str {
        match self {
            Language::English => "Hello",
            Language::Spanish => "Hola",
            Language::Mandarin => "你好",
            Language::Hebrew => "שלום",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Language::English => "Greet someone in English.",
            Language::Spanish => "Greet someone in Spanish.",
            Language::Mandarin => "Greet someone in Mandarin Chinese (你好).",
            Language::Hebrew => "Greet someone in Hebrew (שלום).",
        }
    }

    /// Greet `name`. An empty name still yields the salutation and a space.
    pub fn greet(&self, name: &str) -> String {
        format!("{} {}", self.salutation(), name)
    }
}

/// Action producing a greeting in a fixed language.
#[derive(Debug, Clone, Copy)]
pub struct GreetingAction {
    language: Language,
}

impl GreetingAction {
    /// Create the action for `language`.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// The language this action greets in.
    pub fn language(&self) -> Language {
        self.language
    }
}

#[async_trait]
impl Action for GreetingAction {
    fn name(&self) -> &str {
        self.language.action_name()
    }

    fn description(&self) -> &str {
        self.language.description()
    }

    fn inputs(&self) -> InputSchema {
        InputSchema::new().param(ParamSpec::string("name", "The person's name to greet"))
    }

    fn outputs(&self) -> Vec<(&'static str, &'static str)> {
        vec![("greeting", "string")]
    }

    async fn execute(&self, args: &Arguments) -> Result<ActionOutput, ActionError> {
        let name = args.string("name")?;
        Ok(ActionOutput::new(
            format!("Greeted {} in {}", name, self.language.label()),
            self.language.greet(&name),
        ))
    }
}

/// All four greeting actions, in demo order.
pub fn greeting_actions() -> Vec<Arc<dyn Action>> {
    Language::ALL
        .into_iter()
        .map(|l| Arc::new(GreetingAction::new(l)) as Arc<dyn Action>)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::action::invoke;

    fn greet(language: Language, name: &str) -> crate::action::InvocationResult {
        let raw = json!({ "name": name });
        tokio_test::block_on(invoke(&GreetingAction::new(language), raw.as_object().unwrap()))
    }

    #[test]
    fn test_each_language() {
        assert_eq!(greet(Language::English, "Alice").data, "Hello Alice");
        assert_eq!(greet(Language::Mandarin, "Bob").data, "你好 Bob");
        assert_eq!(greet(Language::Spanish, "Carlos").data, "Hola Carlos");
        assert_eq!(greet(Language::Hebrew, "David").data, "שלום David");
    }

    #[test]
    fn test_empty_name() {
        let result = greet(Language::English, "");
        assert!(result.success);
        assert_eq!(result.data, "Hello ");
    }

    #[test]
    fn test_special_and_unicode_names() {
        assert_eq!(greet(Language::English, "O'Brien").data, "Hello O'Brien");
        assert_eq!(greet(Language::Spanish, "José").data, "Hola José");
    }

    #[test]
    fn test_missing_name_rejected() {
        let result = tokio_test::block_on(invoke(
            &GreetingAction::new(Language::Hebrew),
            &serde_json::Map::new(),
        ));
        assert!(!result.success);
        assert_eq!(result.message, "missing required argument 'name'");
    }

    #[test]
    fn test_greeting_actions() {
        let names: Vec<_> = greeting_actions().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["hello_english", "hello_spanish", "hello_mandarin", "hello_hebrew"]
        );
    }
}
