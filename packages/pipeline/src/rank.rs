//! Classification and ranking.
//!
//! Classifies each merged region through the tier policy table, then ranks
//! regions with a positive percentage in descending order. Regions without
//! data keep rank 0 and are never interleaved into the ranking.

use prevalence_map_summary_models::{PrevalenceTier, RegionSummary};

use crate::merge::MergedRegion;
use crate::{SummaryRegion, SummaryTable};

/// Classifies every region and assigns 1-based ranks among surveyed ones.
///
/// The sort is stable, so regions with equal percentages keep their table
/// order relative to each other.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn classify_and_rank(merged: Vec<MergedRegion>) -> SummaryTable {
    let mut ranked: Vec<(usize, f64)> = merged
        .iter()
        .enumerate()
        .filter(|(_, region)| region.rate_percent > 0.0)
        .map(|(index, region)| (index, region.rate_percent))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut ranks = vec![0_u32; merged.len()];
    for (position, (index, _)) in ranked.iter().enumerate() {
        ranks[*index] = position as u32 + 1;
    }

    let regions = merged
        .into_iter()
        .zip(ranks)
        .map(|(region, rank)| {
            let category = PrevalenceTier::from_rate_percent(region.rate_percent);
            SummaryRegion {
                summary: RegionSummary {
                    region_name: region.region_name,
                    mean_rate: region.mean_rate,
                    case_count: region.case_count,
                    subject_count: region.subject_count,
                    rate_percent: region.rate_percent,
                    category,
                    color: category.color().to_string(),
                    rank,
                },
                boundary: region.boundary,
            }
        })
        .collect();

    SummaryTable { regions }
}
