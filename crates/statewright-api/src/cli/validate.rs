//! Offline definition validation command.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use statewright_core::workflow::validator::validate_definition;
use statewright_types::workflow::CreateDefinitionRequest;

/// Validate the JSON definition in `path` and print the outcome.
///
/// Returns `Ok(true)` when the definition is valid. Unreadable or unparseable
/// files are errors rather than validation failures.
pub async fn validate_file(path: &Path, json: bool) -> Result<bool> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let candidate: CreateDefinitionRequest = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a workflow definition", path.display()))?;

    let issues = validate_definition(&candidate);
    tracing::debug!(file = %path.display(), issues = issues.len(), "validated definition file");

    if json {
        let report = serde_json::json!({
            "file": path.display().to_string(),
            "id": candidate.id,
            "valid": issues.is_empty(),
            "issues": issues,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(issues.is_empty());
    }

    println!();
    if issues.is_empty() {
        println!(
            "  {} '{}' is a valid workflow definition",
            style("✓").green(),
            style(&candidate.id).cyan()
        );
    } else {
        println!(
            "  {} {} issue(s) in {}",
            style("✗").red(),
            style(issues.len()).bold(),
            style(path.display()).cyan()
        );
        println!();
        for issue in &issues {
            println!("  {} {issue}", style("•").dim());
        }
    }
    println!();

    Ok(issues.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn valid_file_passes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wf.json");
        tokio::fs::write(
            &path,
            r#"{
                "id": "toggle",
                "states": [{"id": "off", "isInitial": true}, {"id": "on"}],
                "actions": [
                    {"id": "flip", "fromStates": ["off"], "toState": "on"},
                    {"id": "flop", "fromStates": ["on"], "toState": "off"}
                ]
            }"#,
        )
        .await
        .unwrap();

        assert!(validate_file(&path, true).await.unwrap());
    }

    #[tokio::test]
    async fn invalid_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wf.json");
        tokio::fs::write(&path, r#"{"id": "empty", "states": [], "actions": []}"#)
            .await
            .unwrap();

        assert!(!validate_file(&path, false).await.unwrap());
    }

    #[tokio::test]
    async fn unreadable_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(validate_file(&tmp.path().join("missing.json"), false).await.is_err());

        let path = tmp.path().join("garbage.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(validate_file(&path, false).await.is_err());
    }
}
