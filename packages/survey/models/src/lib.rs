#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Survey record types and the configuration that maps a source CSV onto
//! them.
//!
//! A survey file is individual-level: one row per surveyed subject, with a
//! region name and a yes/no outcome flag. Records carry both fields as raw
//! text; trimming and flag interpretation happen in the pipeline so that
//! in-memory callers get the same semantics as file-based ones.

use serde::{Deserialize, Serialize};

/// One individual-level survey row, as read from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    /// Region name cell, untrimmed.
    pub region_name: String,
    /// Outcome flag cell, exactly as it appears in the source
    /// (e.g. `"Ya"`, `"tidak"`, or free text).
    pub has_condition: String,
}

impl SurveyRecord {
    /// Creates a record from the two source cells.
    #[must_use]
    pub const fn new(region_name: String, has_condition: String) -> Self {
        Self {
            region_name,
            has_condition,
        }
    }
}

/// Column mapping for a survey CSV.
///
/// All keys are optional in configuration; the defaults match the upstream
/// stunting survey layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyFieldMapping {
    /// Header of the column holding the region name.
    #[serde(default = "default_region_column")]
    pub region_name: String,
    /// Header of the column holding the yes/no outcome flag.
    #[serde(default = "default_outcome_column")]
    pub outcome: String,
    /// Token sets used to interpret the outcome flag.
    #[serde(default)]
    pub vocabulary: OutcomeVocabulary,
}

impl Default for SurveyFieldMapping {
    fn default() -> Self {
        Self {
            region_name: default_region_column(),
            outcome: default_outcome_column(),
            vocabulary: OutcomeVocabulary::default(),
        }
    }
}

fn default_region_column() -> String {
    "nama_kecamatan".to_string()
}

fn default_outcome_column() -> String {
    "stunting_balita".to_string()
}

/// Affirmative and negative token sets for the outcome flag.
///
/// Matching is case-insensitive on the trimmed cell text. Anything outside
/// both sets, including an empty cell, resolves to a negative outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutcomeVocabulary {
    /// Tokens read as "has the condition".
    #[serde(default = "default_affirmative")]
    pub affirmative: Vec<String>,
    /// Tokens read as "does not have the condition".
    #[serde(default = "default_negative")]
    pub negative: Vec<String>,
}

impl Default for OutcomeVocabulary {
    fn default() -> Self {
        Self {
            affirmative: default_affirmative(),
            negative: default_negative(),
        }
    }
}

fn default_affirmative() -> Vec<String> {
    vec!["ya".to_string(), "y".to_string()]
}

fn default_negative() -> Vec<String> {
    vec!["tidak".to_string(), "t".to_string()]
}

impl OutcomeVocabulary {
    /// Interprets a raw outcome cell as a boolean flag.
    ///
    /// The cell is trimmed and lowercased, then matched against the
    /// affirmative set. Recognized negatives and unrecognized values both
    /// resolve to `false`; a malformed flag is a data condition here, not an
    /// error.
    #[must_use]
    pub fn interpret(&self, raw: &str) -> bool {
        let token = raw.trim().to_lowercase();
        self.affirmative.iter().any(|entry| *entry == token)
    }

    /// Whether a raw cell matches either token set.
    ///
    /// Used to count values that fell through to the negative default so the
    /// pipeline can surface them as a data-quality warning.
    #[must_use]
    pub fn recognizes(&self, raw: &str) -> bool {
        let token = raw.trim().to_lowercase();
        self.affirmative.iter().any(|entry| *entry == token)
            || self.negative.iter().any(|entry| *entry == token)
    }
}
