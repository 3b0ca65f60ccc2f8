//! Dataset definition loaded from TOML.
//!
//! Operators point the tool at differently-shaped files by overriding column
//! and property names; everything is optional and falls back to the upstream
//! stunting survey layout.

use std::path::Path;

use prevalence_map_boundary_models::BoundaryFieldMapping;
use prevalence_map_survey_models::SurveyFieldMapping;
use serde::Deserialize;

/// How one dataset's files map onto the pipeline inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetDefinition {
    /// Survey CSV column mapping and outcome vocabulary.
    pub records: SurveyFieldMapping,
    /// Boundary GeoJSON property mapping.
    pub boundaries: BoundaryFieldMapping,
}

/// Errors from loading a dataset definition.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("invalid dataset definition in {path}: {source}")]
    Parse {
        /// Path to the definition file.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Loads a dataset definition, falling back to defaults when no path is
/// given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid
/// definition.
pub fn load_dataset_definition(path: Option<&Path>) -> Result<DatasetDefinition, ConfigError> {
    let Some(path) = path else {
        return Ok(DatasetDefinition::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_dataset_definition(&raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parses a dataset definition from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or contains unknown keys.
pub fn parse_dataset_definition(raw: &str) -> Result<DatasetDefinition, toml::de::Error> {
    toml::de::from_str(raw)
}
