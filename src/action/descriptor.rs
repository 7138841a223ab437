// ABOUTME: Capability descriptors - side-effect-free projections of an Action.
// ABOUTME: Used for --context output and for autonomous callers enumerating actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Action;

/// Description of one input parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub description: String,
}

/// Structured description of what an action accepts, returns and does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    pub capability: String,
    pub inputs: BTreeMap<String, InputDescriptor>,
    pub outputs: BTreeMap<String, String>,
    pub description: String,
}

impl CapabilityDescriptor {
    /// Pretty JSON, as printed by `--context`.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Describe an action without executing it.
pub fn describe(action: &dyn Action) -> CapabilityDescriptor {
    let inputs = action
        .inputs()
        .params()
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                InputDescriptor {
                    kind: p.kind.as_str().to_string(),
                    required: p.required,
                    description: p.description.clone(),
                },
            )
        })
        .collect();

    let outputs = action
        .outputs()
        .into_iter()
        .map(|(field, kind)| (field.to_string(), kind.to_string()))
        .collect();

    CapabilityDescriptor {
        capability: action.name().to_string(),
        inputs,
        outputs,
        description: action.description().to_string(),
    }
}
