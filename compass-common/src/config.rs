//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a TOML file. Everything in it is optional;
//! missing keys fall back to the built-in defaults of the consuming service.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name used under the platform config/data folders
pub const APP_DIR_NAME: &str = "political-compass";

/// File name of the SQLite database inside the root folder
pub const DATABASE_FILE_NAME: &str = "political-compass.db";

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime. The service must restart
/// to pick up changes to the file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Root folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port (optional)
    #[serde(default)]
    pub port: Option<u16>,

    /// Path to the weighted question table CSV (optional)
    #[serde(default)]
    pub questions_path: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Text-generation model endpoint
    #[serde(default)]
    pub model: ModelConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Model endpoint section (`[model]`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Base URL of the Ollama-compatible server, e.g. `http://localhost:11434`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model name, e.g. `gemma3:27b`
    #[serde(default)]
    pub name: Option<String>,

    /// Maximum model requests per second across all runs
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Per-request timeout; absent means wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load TOML configuration
///
/// An explicit path must exist and parse. Without one, the platform config
/// locations are searched and a missing file yields the defaults.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => {
                debug!("No config file found, using built-in defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Parse TOML configuration text
pub fn parse_toml_config(content: &str) -> std::result::Result<TomlConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
        warn!("{} is set but empty, ignoring", env_var_name);
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Database path inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}

/// Create the root folder if missing
pub fn ensure_root_folder(root_folder: &Path) -> Result<()> {
    if !root_folder.exists() {
        std::fs::create_dir_all(root_folder)?;
        debug!("Created root folder {}", root_folder.display());
    }
    Ok(())
}

/// Locate the config file for the platform
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR_NAME).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/political-compass (or /var/lib/political-compass)
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/var/lib").join(APP_DIR_NAME))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/political-compass
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support").join(APP_DIR_NAME))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\political-compass
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData").join(APP_DIR_NAME))
    } else {
        PathBuf::from("./political_compass_data")
    }
}
