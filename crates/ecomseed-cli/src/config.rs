use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ecomseed_generate::GenerateOptions;
use ecomseed_load::LoadOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Contents of an `ecomseed.toml` file. Missing sections and keys fall back
/// to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcomseedConfig {
    pub generate: GenerateOptions,
    pub load: LoadOptions,
}

pub fn load_config(path: Option<&Path>) -> Result<EcomseedConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(EcomseedConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<EcomseedConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn render_config(config: &EcomseedConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
