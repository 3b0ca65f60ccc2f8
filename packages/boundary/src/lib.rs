#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary GeoJSON adapter.
//!
//! Reads an administrative boundary `FeatureCollection` into
//! [`BoundaryFeature`]s. Features that cannot contribute to a choropleth are
//! skipped rather than fatal: a missing, blank, or non-string name property,
//! a missing geometry, or a non-areal geometry type all drop the feature
//! with a counted warning. A file that is not valid GeoJSON, or not a
//! `FeatureCollection`, is an error.

use std::path::Path;

use geo::MultiPolygon;
use geojson::GeoJson;
use prevalence_map_boundary_models::{BoundaryFeature, BoundaryFieldMapping};

/// Errors from loading a boundary GeoJSON.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// I/O error reading the file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// GeoJSON parsing error.
    #[error("GeoJSON error in {path}: {source}")]
    Geojson {
        /// Path or label of the GeoJSON source.
        path: String,
        /// Underlying GeoJSON error.
        source: geojson::Error,
    },

    /// The document parsed, but is not a `FeatureCollection`.
    #[error("expected a FeatureCollection in {path}")]
    NotAFeatureCollection {
        /// Path or label of the GeoJSON source.
        path: String,
    },
}

/// Loads boundary features from a GeoJSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid GeoJSON, or is
/// not a `FeatureCollection`.
pub fn load_boundary_features(
    path: &Path,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<BoundaryFeature>, BoundaryError> {
    let raw = std::fs::read_to_string(path).map_err(|e| BoundaryError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_boundary_geojson(&raw, &path.display().to_string(), fields)
}

/// Parses boundary features from GeoJSON text.
///
/// `source` labels the document in errors and logs; the file loader passes
/// the path.
///
/// # Errors
///
/// Returns an error if the text is not valid GeoJSON or is not a
/// `FeatureCollection`.
pub fn parse_boundary_geojson(
    raw: &str,
    source: &str,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<BoundaryFeature>, BoundaryError> {
    let geojson: GeoJson = raw.parse().map_err(|e| BoundaryError::Geojson {
        path: source.to_string(),
        source: e,
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(BoundaryError::NotAFeatureCollection {
            path: source.to_string(),
        });
    };

    let total = collection.features.len();
    let mut features = Vec::new();
    let mut skipped = 0_u64;

    for feature in collection.features {
        match extract_feature(feature, fields) {
            Some(extracted) => features.push(extracted),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!(
            "{source}: skipped {skipped} of {total} features without a usable name or areal geometry"
        );
    }
    log::info!("{source}: loaded {} boundary features", features.len());

    Ok(features)
}

/// Pulls the name property and an areal geometry out of one feature.
fn extract_feature(
    feature: geojson::Feature,
    fields: &BoundaryFieldMapping,
) -> Option<BoundaryFeature> {
    let properties = feature.properties.as_ref()?;
    let raw_name = properties.get(&fields.region_name)?.as_str()?;
    if raw_name.trim().is_empty() {
        return None;
    }
    let region_name = raw_name.to_string();

    let geometry = feature.geometry?;
    let geo_geometry: geo::Geometry<f64> = geometry.try_into().ok()?;
    let multipolygon = match geo_geometry {
        geo::Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
        geo::Geometry::MultiPolygon(multipolygon) => multipolygon,
        _ => return None,
    };

    Some(BoundaryFeature::new(region_name, multipolygon))
}
