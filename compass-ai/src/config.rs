//! Configuration resolution for compass-ai
//!
//! Model endpoint settings resolve with ENV → TOML → built-in default
//! priority. Command-line flags are handled by clap in `main.rs` and win
//! over all of these.

use compass_common::config::TomlConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub const ENV_MODEL_URL: &str = "COMPASS_MODEL_URL";
pub const ENV_MODEL_NAME: &str = "COMPASS_MODEL_NAME";

pub const DEFAULT_MODEL_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL_NAME: &str = "gemma3:27b";
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;
pub const DEFAULT_PORT: u16 = 5730;
pub const DEFAULT_QUESTIONS_PATH: &str = "data/political_compass_question-weights.csv";

/// Resolved model endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    /// Server root, without trailing slash
    pub base_url: String,
    pub model: String,
    pub requests_per_second: u32,
    /// None waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MODEL_URL.to_string(),
            model: DEFAULT_MODEL_NAME.to_string(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            timeout: None,
        }
    }
}

/// Resolve model settings from environment and TOML
pub fn resolve_model_settings(toml_config: &TomlConfig) -> ModelSettings {
    let base_url = resolve_value(
        "model base URL",
        std::env::var(ENV_MODEL_URL).ok(),
        toml_config.model.base_url.clone(),
        DEFAULT_MODEL_URL,
    );
    let model = resolve_value(
        "model name",
        std::env::var(ENV_MODEL_NAME).ok(),
        toml_config.model.name.clone(),
        DEFAULT_MODEL_NAME,
    );

    let requests_per_second = match toml_config.model.requests_per_second {
        Some(0) => {
            warn!(
                "model.requests_per_second = 0 is not allowed, using {}",
                DEFAULT_REQUESTS_PER_SECOND
            );
            DEFAULT_REQUESTS_PER_SECOND
        }
        Some(rps) => rps,
        None => DEFAULT_REQUESTS_PER_SECOND,
    };

    ModelSettings {
        base_url: base_url.trim_end_matches('/').to_string(),
        model,
        requests_per_second,
        timeout: toml_config.model.timeout_secs.map(Duration::from_secs),
    }
}

/// Question table shipped with the crate
pub const BUNDLED_QUESTIONS_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/political_compass_question-weights.csv"
);

/// Resolve the question table path (flag/env handled by clap)
///
/// Falls back to `data/` under the working directory, then to the table
/// bundled with the crate sources.
pub fn resolve_questions_path(cli_arg: Option<PathBuf>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg.or_else(|| toml_config.questions_path.clone()) {
        return path;
    }

    let local = PathBuf::from(DEFAULT_QUESTIONS_PATH);
    if local.exists() {
        local
    } else {
        PathBuf::from(BUNDLED_QUESTIONS_PATH)
    }
}

/// Validate a configured value (non-empty, non-whitespace)
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

fn resolve_value(
    label: &str,
    env_value: Option<String>,
    toml_value: Option<String>,
    default: &str,
) -> String {
    if let Some(value) = env_value.filter(|v| is_valid_value(v)) {
        info!("{} loaded from environment variable", label);
        return value.trim().to_string();
    }

    if let Some(value) = toml_value.filter(|v| is_valid_value(v)) {
        info!("{} loaded from TOML config", label);
        return value.trim().to_string();
    }

    info!("{} not configured, using default {}", label, default);
    default.to_string()
}
