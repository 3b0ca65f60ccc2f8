#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prevalence tier taxonomy and regional summary types.
//!
//! This crate defines the canonical severity tiers that every summarized
//! region is classified into, the fixed policy table that maps a prevalence
//! percentage onto a tier, and the row types that carry per-region results
//! and whole-table overview statistics.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity tier for a region's prevalence percentage.
///
/// Variants are declared least to most severe so that `Ord` can be used to
/// resolve ties toward the more severe tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "title_case")]
pub enum PrevalenceTier {
    /// No surveyed subjects, or none with the condition
    #[serde(rename = "No Data")]
    NoData,
    /// Below 20 percent prevalence
    Low,
    /// 20 to below 30 percent prevalence
    Medium,
    /// 30 percent prevalence and above
    High,
}

impl PrevalenceTier {
    /// Returns all tiers, least severe first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::NoData, Self::Low, Self::Medium, Self::High]
    }

    /// Returns the map fill color for this tier as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::NoData => "#94a3b8",
            Self::Low => "#22c55e",
            Self::Medium => "#eab308",
            Self::High => "#ef4444",
        }
    }

    /// Classifies a prevalence percentage into a tier.
    ///
    /// A percentage of exactly zero means no case was observed (or no subject
    /// was surveyed) and classifies as [`Self::NoData`] before the policy
    /// table is consulted. Every positive percentage falls into the first
    /// rule of [`TIER_RULES`] whose inclusive lower bound it meets.
    #[must_use]
    pub fn from_rate_percent(rate_percent: f64) -> Self {
        if rate_percent <= 0.0 {
            return Self::NoData;
        }

        TIER_RULES
            .iter()
            .find(|rule| rate_percent >= rule.min_percent)
            .map_or(Self::NoData, |rule| rule.tier)
    }
}

/// One row of the classification policy: the tier assigned to any percentage
/// at or above `min_percent` that no more severe rule captured first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    /// Inclusive lower bound on the prevalence percentage.
    pub min_percent: f64,
    /// Tier assigned when the bound is met.
    pub tier: PrevalenceTier,
}

/// Classification policy table, most severe tier first.
///
/// Lower bounds are inclusive: exactly 20.0 is [`PrevalenceTier::Medium`] and
/// exactly 30.0 is [`PrevalenceTier::High`]. A zero percentage never reaches
/// the table; it is the no-data sentinel handled by
/// [`PrevalenceTier::from_rate_percent`].
pub const TIER_RULES: &[TierRule] = &[
    TierRule {
        min_percent: 30.0,
        tier: PrevalenceTier::High,
    },
    TierRule {
        min_percent: 20.0,
        tier: PrevalenceTier::Medium,
    },
    TierRule {
        min_percent: 0.0,
        tier: PrevalenceTier::Low,
    },
];

/// Rounds a value to two decimal places, half away from zero.
///
/// A two-decimal midpoint moves away from zero rather than to the even
/// neighbor: one case among 32 subjects is a rate of exactly 3.125 percent
/// and renders as 3.13, not 3.12. All percentages exposed in summary rows
/// and overview statistics pass through this so that repeated runs over
/// identical inputs render byte-identical artifacts.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Summarized survey results for a single region.
///
/// One row of the final table, serialized as the GeoJSON feature properties
/// of the choropleth artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// Canonical (trimmed) region name, the join key across all inputs.
    pub region_name: String,
    /// Fraction of surveyed subjects with the condition, in `[0, 1]`.
    pub mean_rate: f64,
    /// Number of surveyed subjects with the condition.
    pub case_count: u64,
    /// Total number of surveyed subjects.
    pub subject_count: u64,
    /// `mean_rate` as a percentage, rounded to two decimals.
    pub rate_percent: f64,
    /// Severity tier assigned by the classification policy.
    pub category: PrevalenceTier,
    /// Map fill color paired with the tier.
    pub color: String,
    /// 1-based rank by descending percentage among surveyed regions, or 0
    /// when the region has no data.
    pub rank: u32,
}

/// Number of regions classified into one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCount {
    /// The tier being counted.
    pub tier: PrevalenceTier,
    /// How many regions fall into it.
    pub count: u64,
}

/// Whole-table statistics for dashboard headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOverview {
    /// Total number of regions in the table.
    pub region_count: u64,
    /// Regions with at least one surveyed subject.
    pub surveyed_region_count: u64,
    /// Total surveyed subjects across all regions.
    pub subject_total: u64,
    /// Total subjects with the condition across all regions.
    pub case_total: u64,
    /// Population-level percentage: cases over subjects, not a mean of
    /// per-region rates. Rounded to two decimals.
    pub overall_rate_percent: f64,
    /// Tier holding the most regions, counted over every region with no-data
    /// rows included; ties resolve toward the more severe tier. `None` for an
    /// empty table.
    pub dominant_tier: Option<PrevalenceTier>,
    /// Region count per tier, least severe first, zero counts included.
    pub tier_counts: Vec<TierCount>,
    /// Highest positive percentage in the table, if any.
    pub max_rate_percent: Option<f64>,
    /// Lowest positive percentage in the table, if any.
    pub min_rate_percent: Option<f64>,
    /// Names of regions with no surveyed subjects, in table order.
    pub unsurveyed_regions: Vec<String>,
}
