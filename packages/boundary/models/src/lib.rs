#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative boundary types.
//!
//! A boundary file carries one feature per administrative sub-area; several
//! features can share a region name. The pipeline dissolves them into one
//! [`DissolvedRegion`] per distinct name. Geometry is held as `geo` types
//! because the dissolve stage unions it directly.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// One areal feature from a boundary file, before dissolution.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Region name property, untrimmed.
    pub region_name: String,
    /// Feature geometry. Plain polygons are promoted to a single-element
    /// multi-polygon on load.
    pub geometry: MultiPolygon<f64>,
}

impl BoundaryFeature {
    /// Creates a feature from a name property and its geometry.
    #[must_use]
    pub const fn new(region_name: String, geometry: MultiPolygon<f64>) -> Self {
        Self {
            region_name,
            geometry,
        }
    }
}

/// One region after dissolution: a canonical name and the union of every
/// feature geometry that carried it.
#[derive(Debug, Clone, PartialEq)]
pub struct DissolvedRegion {
    /// Canonical (trimmed) region name.
    pub region_name: String,
    /// Union of all member feature geometries.
    pub boundary: MultiPolygon<f64>,
}

/// Property mapping for a boundary GeoJSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryFieldMapping {
    /// Name of the feature property holding the region name.
    #[serde(default = "default_region_property")]
    pub region_name: String,
}

impl Default for BoundaryFieldMapping {
    fn default() -> Self {
        Self {
            region_name: default_region_property(),
        }
    }
}

fn default_region_property() -> String {
    "WADMKC".to_string()
}
