//! Workflow definition validation.
//!
//! Checks a candidate definition for structural and semantic problems before
//! it is accepted into the store. Every applicable issue is collected so a
//! client can fix a definition in one round-trip; only a missing id or
//! missing state/action lists stop validation early.

use std::collections::HashSet;

use statewright_types::workflow::{Action, CreateDefinitionRequest, State};

/// Validate a candidate workflow definition.
///
/// Returns one human-readable message per issue; an empty list means the
/// definition is valid.
///
/// Checks, in order:
/// - id is non-empty (stops on failure)
/// - `states` and `actions` are present (stops on failure)
/// - at least one state, exactly one initial state
/// - state ids non-empty and unique (each duplicated id reported once)
/// - at least one action
/// - per action: non-empty unique id, known `toState`, non-empty
///   `fromStates` referencing known states
pub fn validate_definition(candidate: &CreateDefinitionRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(&candidate.id) {
        errors.push("Workflow definition ID cannot be empty.".to_string());
        return errors;
    }

    let (Some(states), Some(actions)) = (&candidate.states, &candidate.actions) else {
        errors.push("Definition must contain 'states' and 'actions' arrays.".to_string());
        return errors;
    };

    validate_states(states, &mut errors);
    validate_actions(states, actions, &mut errors);

    errors
}

fn validate_states(states: &[State], errors: &mut Vec<String>) {
    if states.is_empty() {
        errors.push("Workflow must have at least one state.".to_string());
        return;
    }

    let initial_count = states.iter().filter(|s| s.is_initial).count();
    if initial_count != 1 {
        errors.push(format!(
            "Workflow must have exactly one initial state (found {initial_count})."
        ));
    }

    for id in duplicate_ids(states.iter().map(|s| s.id.as_str()), errors, "State") {
        errors.push(format!("Duplicate state ID found: '{id}'."));
    }
}

fn validate_actions(states: &[State], actions: &[Action], errors: &mut Vec<String>) {
    if actions.is_empty() {
        errors.push("Workflow must have at least one action.".to_string());
        return;
    }

    let state_ids: HashSet<&str> = states
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| !is_blank(id))
        .collect();

    for id in duplicate_ids(actions.iter().map(|a| a.id.as_str()), errors, "Action") {
        errors.push(format!("Duplicate action ID found: '{id}'."));
    }

    for action in actions {
        if !state_ids.contains(action.to_state.as_str()) {
            errors.push(format!(
                "Action '{}' refers to an unknown toState: '{}'.",
                action.id, action.to_state
            ));
        }

        if action.from_states.is_empty() {
            errors.push(format!(
                "Action '{}' must have at least one fromState.",
                action.id
            ));
            continue;
        }

        for from in &action.from_states {
            if !state_ids.contains(from.as_str()) {
                errors.push(format!(
                    "Action '{}' refers to an unknown fromState: '{}'.",
                    action.id, from
                ));
            }
        }
    }
}

/// Report blank ids individually and return each distinct duplicated id once,
/// in order of first repetition.
fn duplicate_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<String>,
    label: &str,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for id in ids {
        if is_blank(id) {
            errors.push(format!("{label} ID cannot be empty."));
        } else if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id);
        }
    }

    duplicates
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(id: &str, initial: bool, is_final: bool) -> State {
        State {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            is_initial: initial,
            is_final,
            enabled: true,
        }
    }

    fn action(id: &str, from: &[&str], to: &str) -> Action {
        Action {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            enabled: true,
            from_states: from.iter().map(|s| s.to_string()).collect(),
            to_state: to.to_string(),
        }
    }

    /// Helper: the review workflow (start -> review -> done).
    fn review_request() -> CreateDefinitionRequest {
        CreateDefinitionRequest {
            id: "review".to_string(),
            name: "Review".to_string(),
            description: String::new(),
            states: Some(vec![
                state("start", true, false),
                state("review", false, false),
                state("done", false, true),
            ]),
            actions: Some(vec![
                action("submit", &["start"], "review"),
                action("approve", &["review"], "done"),
            ]),
        }
    }

    fn mentions(errors: &[String], needle: &str) -> usize {
        errors.iter().filter(|e| e.contains(needle)).count()
    }

    #[test]
    fn test_valid_definition_has_no_errors() {
        assert!(validate_definition(&review_request()).is_empty());
    }

    #[test]
    fn test_empty_id_stops_validation() {
        let mut req = review_request();
        req.id = "   ".to_string();
        req.states = Some(Vec::new());
        let errors = validate_definition(&req);
        assert_eq!(errors, vec!["Workflow definition ID cannot be empty.".to_string()]);
    }

    #[test]
    fn test_missing_lists_stop_validation() {
        let mut req = review_request();
        req.actions = None;
        let errors = validate_definition(&req);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'states' and 'actions'"));

        let mut req = review_request();
        req.states = None;
        assert_eq!(validate_definition(&req).len(), 1);
    }

    #[test]
    fn test_empty_lists_both_reported() {
        let mut req = review_request();
        req.states = Some(Vec::new());
        req.actions = Some(Vec::new());
        let errors = validate_definition(&req);
        assert_eq!(errors.len(), 2);
        assert_eq!(mentions(&errors, "at least one state"), 1);
        assert_eq!(mentions(&errors, "at least one action"), 1);
    }

    #[test]
    fn test_zero_initial_states_rejected() {
        let mut req = review_request();
        if let Some(states) = req.states.as_mut() {
            states[0].is_initial = false;
        }
        let errors = validate_definition(&req);
        assert_eq!(mentions(&errors, "exactly one initial state"), 1);
    }

    #[test]
    fn test_multiple_initial_states_rejected() {
        let mut req = review_request();
        if let Some(states) = req.states.as_mut() {
            for s in states.iter_mut() {
                s.is_initial = true;
            }
        }
        let errors = validate_definition(&req);
        assert_eq!(mentions(&errors, "exactly one initial state"), 1);
    }

    #[test]
    fn test_duplicate_state_named_once() {
        let mut req = review_request();
        if let Some(states) = req.states.as_mut() {
            states.push(state("review", false, false));
            states.push(state("review", false, false));
        }
        let errors = validate_definition(&req);
        assert_eq!(mentions(&errors, "Duplicate state ID found: 'review'"), 1);
    }

    #[test]
    fn test_every_duplicate_state_id_named() {
        let mut req = review_request();
        if let Some(states) = req.states.as_mut() {
            states.push(state("s1", false, false));
            states.push(state("s1", false, false));
            states.push(state("done", false, false));
        }
        let errors = validate_definition(&req);
        assert_eq!(mentions(&errors, "'s1'"), 1);
        assert_eq!(mentions(&errors, "Duplicate state ID found: 'done'"), 1);
    }

    #[test]
    fn test_empty_state_ids_reported_individually() {
        let mut req = review_request();
        if let Some(states) = req.states.as_mut() {
            states.push(state("", false, false));
            states.push(state(" ", false, false));
        }
        let errors = validate_definition(&req);
        assert_eq!(mentions(&errors, "State ID cannot be empty"), 2);
        assert_eq!(mentions(&errors, "Duplicate state ID"), 0);
    }

    #[test]
    fn test_action_checks_accumulate() {
        let mut req = review_request();
        req.actions = Some(vec![
            action("submit", &["start"], "review"),
            action("submit", &["start"], "review"),
            action("", &["start"], "nowhere"),
            action("orphan", &[], "done"),
            action("stray", &["start", "limbo"], "done"),
        ]);
        let errors = validate_definition(&req);
        assert_eq!(mentions(&errors, "Duplicate action ID found: 'submit'"), 1);
        assert_eq!(mentions(&errors, "Action ID cannot be empty"), 1);
        assert_eq!(mentions(&errors, "unknown toState: 'nowhere'"), 1);
        assert_eq!(mentions(&errors, "'orphan' must have at least one fromState"), 1);
        assert_eq!(mentions(&errors, "unknown fromState: 'limbo'"), 1);
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_state_and_action_errors_reported_together() {
        let mut req = review_request();
        if let Some(states) = req.states.as_mut() {
            states[0].is_initial = false;
        }
        req.actions = Some(Vec::new());
        let errors = validate_definition(&req);
        assert_eq!(errors.len(), 2);
    }
}
