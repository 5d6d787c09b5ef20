use std::path::Path;

use pbx_store::{MAX_REFERENCE_BYTES, MIN_REFERENCE_BYTES};
use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, ProjectResult};

/// Settings for one editing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Width of generated references in bytes (hex output is twice as long).
    pub reference_bytes: usize,
    /// Emit generated references as uppercase hex, as Xcode does.
    pub uppercase_references: bool,
    /// Default for new groups: name only, no backing folder path.
    pub without_folder: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            reference_bytes: 12,
            uppercase_references: true,
            without_folder: false,
        }
    }
}

impl ProjectConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> ProjectResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ProjectError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> ProjectResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> ProjectResult<()> {
        if !(MIN_REFERENCE_BYTES..=MAX_REFERENCE_BYTES).contains(&self.reference_bytes) {
            return Err(ProjectError::Config(format!(
                "reference_bytes must be between {MIN_REFERENCE_BYTES} and {MAX_REFERENCE_BYTES}, got {}",
                self.reference_bytes
            )));
        }
        Ok(())
    }
}
