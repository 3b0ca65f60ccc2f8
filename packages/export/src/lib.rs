#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Artifact writers for a finished summary table.
//!
//! Two artifacts: a summary CSV sorted by descending percentage, and a
//! choropleth-ready GeoJSON `FeatureCollection` carrying each region's
//! summary row as feature properties. Both are deterministic: identical
//! tables serialize to identical bytes.

use std::path::Path;

pub mod choropleth;
pub mod summary_csv;

pub use choropleth::{choropleth_feature_collection, write_choropleth_geojson};
pub use summary_csv::write_summary_csv;

use prevalence_map_pipeline::SummaryTable;

/// Errors from writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error creating or writing a file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV serialization error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Writes both artifacts into `output_dir`, creating it if needed.
///
/// Files are `summary.csv` and `regions.geojson`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or either artifact
/// fails to serialize or write.
pub fn write_artifacts(table: &SummaryTable, output_dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ExportError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    summary_csv::write_summary_csv_file(&output_dir.join("summary.csv"), table)?;
    choropleth::write_choropleth_geojson_file(&output_dir.join("regions.geojson"), table)?;

    Ok(())
}
