//! Workflow domain types for statewright.
//!
//! A `WorkflowDefinition` declares a finite state machine (states plus the
//! actions that move between them). A `WorkflowInstance` is one running
//! execution of a definition: a token sitting on exactly one state, plus the
//! append-only `Change` history of how it got there.
//!
//! The JSON wire format uses camelCase field names (`isInitial`, `fromStates`,
//! `definitionId`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Unique identifier for a workflow instance, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// Create a new InstanceId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an InstanceId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// True for the all-zero UUID, which is never handed out.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

fn default_enabled() -> bool {
    true
}

/// Treat an explicit `null` like a missing key. Paired with `#[serde(default)]`
/// so incomplete definitions reach the validator instead of failing to parse.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Definition
// ---------------------------------------------------------------------------

/// A node of the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Unique within the owning definition.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Exactly one state per definition is the initial state.
    #[serde(default)]
    pub is_initial: bool,
    /// Final states are absorbing: no action fires once an instance is here.
    #[serde(default)]
    pub is_final: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// A named, directed transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Unique within the owning definition.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Disabled actions never fire, whatever the current state.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// States from which this action may fire.
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_states: Vec<String>,
    /// State the instance moves to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_state: String,
}

impl Action {
    /// Whether `state_id` is one of this action's legal source states.
    pub fn fires_from(&self, state_id: &str) -> bool {
        self.from_states.iter().any(|s| s == state_id)
    }
}

/// An accepted workflow definition. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Caller-supplied id, globally unique among stored definitions.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub states: Vec<State>,
    pub actions: Vec<Action>,
}

impl WorkflowDefinition {
    /// Look up a state by id.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    /// Look up an action by id.
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// The single initial state, or `None` when there are zero or several.
    pub fn initial_state(&self) -> Option<&State> {
        let mut initial = self.states.iter().filter(|s| s.is_initial);
        match (initial.next(), initial.next()) {
            (Some(state), None) => Some(state),
            _ => None,
        }
    }
}

/// A candidate definition as submitted by a client.
///
/// `states` and `actions` stay optional so that a payload missing either key
/// still reaches the validator and gets a readable error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDefinitionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub states: Option<Vec<State>>,
    #[serde(default)]
    pub actions: Option<Vec<Action>>,
}

impl CreateDefinitionRequest {
    /// Convert into a definition. Missing lists become empty; callers are
    /// expected to have validated the request first.
    pub fn into_definition(self) -> WorkflowDefinition {
        WorkflowDefinition {
            id: self.id,
            name: self.name,
            description: self.description,
            states: self.states.unwrap_or_default(),
            actions: self.actions.unwrap_or_default(),
        }
    }
}

impl From<WorkflowDefinition> for CreateDefinitionRequest {
    fn from(def: WorkflowDefinition) -> Self {
        Self {
            id: def.id,
            name: def.name,
            description: def.description,
            states: Some(def.states),
            actions: Some(def.actions),
        }
    }
}

// ---------------------------------------------------------------------------
// Instance
// ---------------------------------------------------------------------------

/// Audit record for one successfully applied transition. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub timestamp: DateTime<Utc>,
    pub action_id: String,
    pub from_state: String,
    pub to_state: String,
}

/// One running execution of a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInstance {
    pub id: InstanceId,
    /// Weak reference to the stored definition.
    pub definition_id: String,
    pub current_state: String,
    /// One entry per successful transition, oldest first.
    pub history: Vec<Change>,
}

impl WorkflowInstance {
    /// Create a fresh instance positioned on `initial_state` with empty history.
    pub fn new(definition_id: impl Into<String>, initial_state: impl Into<String>) -> Self {
        Self {
            id: InstanceId::new(),
            definition_id: definition_id.into(),
            current_state: initial_state.into(),
            history: Vec::new(),
        }
    }

    /// Record `change` and move to its target state as one step.
    pub fn apply(&mut self, change: Change) {
        self.current_state = change.to_state.clone();
        self.history.push(change);
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /instances`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInstanceRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition_id: String,
}

/// Body of `POST /instances/{id}/execute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteActionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(id: &str, initial: bool) -> State {
        State {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            is_initial: initial,
            is_final: false,
            enabled: true,
        }
    }

    #[test]
    fn test_instance_id_roundtrip() {
        let id = InstanceId::new();
        let parsed: InstanceId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!(!id.is_nil());
    }

    #[test]
    fn test_state_deserializes_camel_case_with_defaults() {
        let state: State = serde_json::from_str(r#"{"id":"start","isInitial":true}"#).unwrap();
        assert_eq!(state.id, "start");
        assert!(state.is_initial);
        assert!(!state.is_final);
        assert!(state.enabled);
        assert!(state.name.is_empty());
    }

    #[test]
    fn test_action_serializes_camel_case() {
        let action = Action {
            id: "submit".to_string(),
            name: "Submit".to_string(),
            description: String::new(),
            enabled: true,
            from_states: vec!["start".to_string()],
            to_state: "review".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["fromStates"][0], "start");
        assert_eq!(json["toState"], "review");
        assert!(action.fires_from("start"));
        assert!(!action.fires_from("review"));
    }

    #[test]
    fn test_request_missing_lists_is_none() {
        let req: CreateDefinitionRequest = serde_json::from_str(r#"{"id":"wf"}"#).unwrap();
        assert!(req.states.is_none());
        assert!(req.actions.is_none());

        let req: CreateDefinitionRequest =
            serde_json::from_str(r#"{"id":"wf","states":null,"actions":[]}"#).unwrap();
        assert!(req.states.is_none());
        assert_eq!(req.actions.map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_request_missing_or_null_ids_become_empty() {
        let req: CreateDefinitionRequest = serde_json::from_str(
            r#"{
                "id": null,
                "states": [{"isInitial": true}, {"id": null, "name": null}],
                "actions": [{"id": "a", "fromStates": null}]
            }"#,
        )
        .unwrap();
        assert!(req.id.is_empty());

        let states = req.states.unwrap();
        assert!(states.iter().all(|s| s.id.is_empty()));
        assert!(states[0].is_initial);

        let actions = req.actions.unwrap();
        assert_eq!(actions[0].id, "a");
        assert!(actions[0].to_state.is_empty());
        assert!(actions[0].from_states.is_empty());
        assert!(actions[0].enabled);
    }

    #[test]
    fn test_initial_state_requires_exactly_one() {
        let mut def = WorkflowDefinition {
            id: "wf".to_string(),
            name: String::new(),
            description: String::new(),
            states: vec![state("a", true), state("b", false)],
            actions: Vec::new(),
        };
        assert_eq!(def.initial_state().map(|s| s.id.as_str()), Some("a"));

        def.states[1].is_initial = true;
        assert!(def.initial_state().is_none());

        def.states.clear();
        assert!(def.initial_state().is_none());
    }

    #[test]
    fn test_apply_moves_state_and_appends_history() {
        let mut instance = WorkflowInstance::new("wf", "a");
        instance.apply(Change {
            timestamp: Utc::now(),
            action_id: "go".to_string(),
            from_state: "a".to_string(),
            to_state: "b".to_string(),
        });
        assert_eq!(instance.current_state, "b");
        assert_eq!(instance.history.len(), 1);
        assert_eq!(instance.history[0].from_state, "a");
    }
}
