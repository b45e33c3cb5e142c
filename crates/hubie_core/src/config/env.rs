use std::path::Path;
use std::{env, fs};

use tracing::info;

use super::EngineConfig;
use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "HUBIE_CONFIG_PATH";

/// Load the config named by `HUBIE_CONFIG_PATH`, or the defaults when the
/// variable is unset or blank.
pub fn load_from_env() -> Result<EngineConfig, ConfigError> {
    let Ok(path) = env::var(CONFIG_PATH_ENV) else {
        return Ok(EngineConfig::default());
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(EngineConfig::default());
    }

    load_from_path(Path::new(path))
}

/// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
pub fn load_from_path(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let config = if is_yaml {
        EngineConfig::from_yaml(&content)?
    } else {
        EngineConfig::from_json(&content)?
    };

    info!(path = %path.display(), "loaded engine config");
    Ok(config)
}
