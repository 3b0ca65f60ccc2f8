//! Whole-table overview statistics.
//!
//! Dashboard numbers over a finished table: totals, the population-level
//! rate, tier distribution, extremes, and the regions the survey never
//! reached. "Surveyed" here means at least one subject; a region full of
//! negative outcomes is surveyed even though it classifies as no-data.
//! The dominant tier counts every region, no-data rows included, which
//! keeps it defined for a table with no positive rates and lets a mostly
//! unsurveyed table report exactly that; ties resolve toward the more
//! severe tier.

use std::collections::BTreeMap;

use prevalence_map_summary_models::{PrevalenceTier, TableOverview, TierCount, round2};

use crate::SummaryTable;

/// Computes overview statistics for a table.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn overview(table: &SummaryTable) -> TableOverview {
    let mut subject_total = 0_u64;
    let mut case_total = 0_u64;
    let mut surveyed_region_count = 0_u64;
    let mut tier_totals: BTreeMap<PrevalenceTier, u64> = BTreeMap::new();
    let mut max_rate_percent: Option<f64> = None;
    let mut min_rate_percent: Option<f64> = None;
    let mut unsurveyed_regions = Vec::new();

    for region in &table.regions {
        let row = &region.summary;
        subject_total += row.subject_count;
        case_total += row.case_count;
        *tier_totals.entry(row.category).or_default() += 1;

        if row.subject_count > 0 {
            surveyed_region_count += 1;
        } else {
            unsurveyed_regions.push(row.region_name.clone());
        }

        if row.rate_percent > 0.0 {
            max_rate_percent =
                Some(max_rate_percent.map_or(row.rate_percent, |m| m.max(row.rate_percent)));
            min_rate_percent =
                Some(min_rate_percent.map_or(row.rate_percent, |m| m.min(row.rate_percent)));
        }
    }

    let overall_rate_percent = if subject_total > 0 {
        round2(case_total as f64 / subject_total as f64 * 100.0)
    } else {
        0.0
    };

    // Ties go to the more severe tier; the tuple key makes that explicit.
    let dominant_tier = tier_totals
        .iter()
        .max_by_key(|(tier, count)| (**count, **tier))
        .map(|(tier, _)| *tier);

    let tier_counts = PrevalenceTier::all()
        .iter()
        .map(|tier| TierCount {
            tier: *tier,
            count: tier_totals.get(tier).copied().unwrap_or(0),
        })
        .collect();

    TableOverview {
        region_count: table.len() as u64,
        surveyed_region_count,
        subject_total,
        case_total,
        overall_rate_percent,
        dominant_tier,
        tier_counts,
        max_rate_percent,
        min_rate_percent,
        unsurveyed_regions,
    }
}
