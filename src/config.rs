use crate::models::AppConfig;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Arc<AppConfig>, String> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    // Read the file
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    // Parse YAML
    let mut config: AppConfig = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse YAML config: {}", e))?;

    apply_env_overrides(&mut config);

    // Validate the configuration
    config.validate()?;

    info!("Configuration loaded successfully");

    Ok(Arc::new(config))
}

/// Load configuration with fallback options
pub fn load_config_with_fallback() -> Result<Arc<AppConfig>, String> {
    // Try loading from environment variable first
    if let Ok(config_path) = std::env::var("CONFIG_PATH") {
        match load_config(&config_path) {
            Ok(config) => return Ok(config),
            Err(e) => warn!(
                "Failed to load config from CONFIG_PATH ({}): {}",
                config_path, e
            ),
        }
    }

    // Try common config file locations
    let paths = vec!["config.yaml", "config.yml", "./config.yaml", "./config.yml"];

    for path in paths {
        if Path::new(path).exists() {
            match load_config(path) {
                Ok(config) => return Ok(config),
                Err(e) => warn!("Failed to load config from '{}': {}", path, e),
            }
        }
    }

    // Every setting has a usable default, so a missing file is not fatal
    warn!(
        "No configuration file found; using built-in defaults. \
        See config.example.yaml for an example configuration."
    );

    let mut config = AppConfig::default();
    apply_env_overrides(&mut config);
    config.validate()?;

    Ok(Arc::new(config))
}

/// Apply environment overrides on top of file-provided settings.
///
/// Values stay raw; resolution happens in `session::types` like any
/// other operator input.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(value) = std::env::var("IDLE_TIME") {
        config.session.idle_time = Some(value);
    }
    if let Ok(value) = std::env::var("IDLE_MESSAGE") {
        config.session.idle_message = Some(value);
    }
}
