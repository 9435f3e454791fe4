//! Server configuration loader for statewright.
//!
//! Reads a TOML file (by default `config.toml` in the working directory, or
//! the path in `$STATEWRIGHT_CONFIG`) and deserializes it into
//! [`ServerConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use statewright_types::config::ServerConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "STATEWRIGHT_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Resolve the config file path.
///
/// Priority:
/// 1. Explicit path (from `--config`)
/// 2. `$STATEWRIGHT_CONFIG`
/// 3. `./config.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load server configuration from `path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_server_config(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}
