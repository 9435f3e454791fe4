//! Transition evaluation.
//!
//! A definition is a directed multigraph: state ids are nodes, and each
//! enabled action contributes one edge per `fromState` to its `toState`. An
//! instance is a token on one node. [`evaluate_transition`] decides whether
//! the token may move along a named action and, if so, returns the `Change`
//! to record. It never mutates anything; the caller applies the change.

use chrono::{DateTime, Utc};
use statewright_types::error::WorkflowError;
use statewright_types::workflow::{Action, Change, WorkflowDefinition, WorkflowInstance};

/// Decide whether `action_id` may fire on `instance`.
///
/// Gates are checked in a fixed order and the first failure wins:
/// 1. current state is declared in the definition (`InvalidState`)
/// 2. current state is not final (`TerminalState`)
/// 3. action exists (`ActionNotFound`)
/// 4. action is enabled (`ActionDisabled`), regardless of current state
/// 5. current state is one of the action's `fromStates` (`IllegalTransition`)
/// 6. the action's `toState` is declared (`InvalidDefinition`)
pub fn evaluate_transition(
    definition: &WorkflowDefinition,
    instance: &WorkflowInstance,
    action_id: &str,
    at: DateTime<Utc>,
) -> Result<Change, WorkflowError> {
    let current = definition.state(&instance.current_state).ok_or_else(|| {
        WorkflowError::InvalidState(format!(
            "current state '{}' is not declared in definition '{}'",
            instance.current_state, definition.id
        ))
    })?;

    if current.is_final {
        return Err(WorkflowError::TerminalState {
            state: current.id.clone(),
        });
    }

    let action = definition
        .action(action_id)
        .ok_or_else(|| WorkflowError::ActionNotFound(action_id.to_string()))?;

    if !action.enabled {
        return Err(WorkflowError::ActionDisabled(action.id.clone()));
    }

    if !action.fires_from(&current.id) {
        return Err(WorkflowError::IllegalTransition {
            action: action.id.clone(),
            state: current.id.clone(),
        });
    }

    if definition.state(&action.to_state).is_none() {
        return Err(WorkflowError::InvalidDefinition(format!(
            "action '{}' transitions to an unknown state '{}'",
            action.id, action.to_state
        )));
    }

    Ok(Change {
        timestamp: at,
        action_id: action.id.clone(),
        from_state: current.id.clone(),
        to_state: action.to_state.clone(),
    })
}

/// Actions that would currently pass every gate of [`evaluate_transition`].
///
/// Empty when the instance sits on a final or undeclared state.
pub fn available_actions<'a>(
    definition: &'a WorkflowDefinition,
    instance: &WorkflowInstance,
) -> Vec<&'a Action> {
    match definition.state(&instance.current_state) {
        Some(current) if !current.is_final => definition
            .actions
            .iter()
            .filter(|a| {
                a.enabled && a.fires_from(&current.id) && definition.state(&a.to_state).is_some()
            })
            .collect(),
        _ => Vec::new(),
    }
}
