//! Statistical aggregation.
//!
//! Groups normalized records by region name and reduces the outcome flag to
//! count, sum, and mean per region.

use std::collections::BTreeMap;

use crate::normalize::NormalizedRecord;

/// Aggregated outcome statistics for one region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStats {
    /// Fraction of subjects with the condition, in `[0, 1]`.
    pub mean_rate: f64,
    /// Subjects with the condition.
    pub case_count: u64,
    /// Total surveyed subjects.
    pub subject_count: u64,
}

/// Groups records by region name and computes per-region statistics.
///
/// Only regions that appear in the records show up in the result; the merge
/// stage is responsible for zero-filling regions the survey never reached.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(records: &[NormalizedRecord]) -> BTreeMap<String, RegionStats> {
    let mut stats: BTreeMap<String, RegionStats> = BTreeMap::new();

    for record in records {
        let entry = stats.entry(record.region_name.clone()).or_default();
        entry.subject_count += 1;
        if record.has_condition {
            entry.case_count += 1;
        }
    }

    for entry in stats.values_mut() {
        if entry.subject_count > 0 {
            entry.mean_rate = entry.case_count as f64 / entry.subject_count as f64;
        }
    }

    stats
}
