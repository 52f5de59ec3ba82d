use std::path::Path;

use crate::error::{Result, StationError};

/// Deserialize a YAML config from a string.
pub fn parse_config<C: serde::de::DeserializeOwned>(content: &str) -> Result<C> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load and deserialize a YAML config file.
pub fn load_config<C: serde::de::DeserializeOwned>(path: &Path) -> Result<C> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        StationError::Config(format!("Failed to read config '{}': {}", path.display(), e))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        StationError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
    })
}

/// Load a config file when a path is given, otherwise fall back to defaults.
pub fn load_config_or_default<C>(path: Option<&Path>) -> Result<C>
where
    C: serde::de::DeserializeOwned + Default,
{
    match path {
        Some(path) => load_config(path),
        None => {
            log::info!("No config file specified, using defaults");
            Ok(C::default())
        }
    }
}
