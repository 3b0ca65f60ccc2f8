//! Merge-and-fill.
//!
//! Left-joins aggregated statistics onto dissolved regions. Geometry is
//! authoritative: every dissolved region produces a row. Regions the survey
//! never reached get zeroed statistics; statistics whose name matches no
//! region are dropped with a warning.

use std::collections::BTreeMap;

use geo::MultiPolygon;
use prevalence_map_boundary_models::DissolvedRegion;
use prevalence_map_summary_models::round2;

use crate::aggregate::RegionStats;

/// One region after the statistics join, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRegion {
    /// Canonical region name.
    pub region_name: String,
    /// Dissolved region geometry.
    pub boundary: MultiPolygon<f64>,
    /// Fraction of subjects with the condition, zero when unsurveyed.
    pub mean_rate: f64,
    /// Subjects with the condition.
    pub case_count: u64,
    /// Total surveyed subjects.
    pub subject_count: u64,
    /// `mean_rate` as a percentage, rounded to two decimals.
    pub rate_percent: f64,
}

/// Joins statistics onto regions, zero-filling where the survey is silent.
#[must_use]
pub fn merge_and_fill(
    dissolved: Vec<DissolvedRegion>,
    mut stats: BTreeMap<String, RegionStats>,
) -> Vec<MergedRegion> {
    let mut merged = Vec::with_capacity(dissolved.len());

    for region in dissolved {
        let region_stats = stats.remove(&region.region_name).unwrap_or_default();
        merged.push(MergedRegion {
            region_name: region.region_name,
            boundary: region.boundary,
            mean_rate: region_stats.mean_rate,
            case_count: region_stats.case_count,
            subject_count: region_stats.subject_count,
            rate_percent: round2(region_stats.mean_rate * 100.0),
        });
    }

    if !stats.is_empty() {
        let orphaned: Vec<&String> = stats.keys().collect();
        log::warn!(
            "{} survey regions matched no boundary and were dropped: {orphaned:?}",
            stats.len()
        );
    }

    merged
}
