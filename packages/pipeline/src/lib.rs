#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation-classification engine.
//!
//! Turns individual-level survey records plus administrative boundary
//! features into one summarized, classified, ranked row per region. Four
//! ordered stages: geometry dissolution, statistical aggregation,
//! merge-and-fill, and classification-and-ranking, with a normalization pass
//! over the records up front.
//!
//! The engine is total over in-memory inputs: malformed flag values default
//! to negative, unmatched names zero-fill or drop, and nothing here returns
//! an error. Failures belong to the adapters that load the files.

use geo::MultiPolygon;
use prevalence_map_boundary_models::BoundaryFeature;
use prevalence_map_summary_models::RegionSummary;
use prevalence_map_survey_models::{OutcomeVocabulary, SurveyRecord};

pub mod aggregate;
pub mod cache;
pub mod dissolve;
pub mod merge;
pub mod normalize;
pub mod overview;
pub mod rank;

pub use cache::{ContentKey, PipelineCache, content_key};
pub use overview::overview;

/// One row of the final table, with its dissolved geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRegion {
    /// Summary row serialized into artifacts.
    pub summary: RegionSummary,
    /// Dissolved region geometry.
    pub boundary: MultiPolygon<f64>,
}

/// The final per-region table, ordered by region name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    /// All regions, surveyed or not.
    pub regions: Vec<SummaryRegion>,
}

impl SummaryTable {
    /// Number of regions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Looks up a region by its canonical name.
    #[must_use]
    pub fn get(&self, region_name: &str) -> Option<&SummaryRegion> {
        self.regions
            .iter()
            .find(|region| region.summary.region_name == region_name)
    }

    /// Rows in descending percentage order, table order for ties. This is
    /// the presentation order of exported artifacts.
    #[must_use]
    pub fn by_rate_descending(&self) -> Vec<&SummaryRegion> {
        let mut rows: Vec<&SummaryRegion> = self.regions.iter().collect();
        rows.sort_by(|a, b| b.summary.rate_percent.total_cmp(&a.summary.rate_percent));
        rows
    }
}

/// Runs the full pipeline over in-memory inputs.
///
/// Identical inputs always produce an identical table; see
/// [`PipelineCache`] for reusing that property across repeated calls.
#[must_use]
pub fn run(
    records: &[SurveyRecord],
    features: Vec<BoundaryFeature>,
    vocabulary: &OutcomeVocabulary,
) -> SummaryTable {
    let feature_count = features.len();

    let normalized = normalize::normalize_records(records, vocabulary);
    let dissolved = dissolve::dissolve(features);
    log::info!(
        "dissolved {feature_count} boundary features into {} regions",
        dissolved.len()
    );

    let stats = aggregate::aggregate(&normalized);
    log::info!(
        "aggregated {} records across {} surveyed regions",
        normalized.len(),
        stats.len()
    );

    let merged = merge::merge_and_fill(dissolved, stats);
    let table = rank::classify_and_rank(merged);

    let ranked = table
        .regions
        .iter()
        .filter(|region| region.summary.rank > 0)
        .count();
    log::info!("classified {} regions, {ranked} ranked", table.len());

    table
}
