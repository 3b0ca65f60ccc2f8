//! Input normalization.
//!
//! Region names are trimmed and outcome flags interpreted here, inside the
//! engine, so in-memory callers get the same semantics as the file adapters.

use prevalence_map_survey_models::{OutcomeVocabulary, SurveyRecord};

/// One survey record after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Trimmed region name.
    pub region_name: String,
    /// Interpreted outcome flag.
    pub has_condition: bool,
}

/// Trims region names and interprets outcome flags.
///
/// A flag outside both vocabulary sets resolves to `false` rather than
/// erroring; such values are counted and reported in a single warning.
#[must_use]
pub fn normalize_records(
    records: &[SurveyRecord],
    vocabulary: &OutcomeVocabulary,
) -> Vec<NormalizedRecord> {
    let mut unrecognized = 0_u64;

    let normalized = records
        .iter()
        .map(|record| {
            if !vocabulary.recognizes(&record.has_condition) {
                unrecognized += 1;
            }
            NormalizedRecord {
                region_name: record.region_name.trim().to_string(),
                has_condition: vocabulary.interpret(&record.has_condition),
            }
        })
        .collect();

    if unrecognized > 0 {
        log::warn!(
            "{unrecognized} outcome values matched neither vocabulary set; defaulted to negative"
        );
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region_name: &str, has_condition: &str) -> SurveyRecord {
        SurveyRecord::new(region_name.to_string(), has_condition.to_string())
    }

    #[test]
    fn trims_region_names() {
        let records = vec![record(" Waru ", "ya"), record("Taman", "tidak")];
        let normalized = normalize_records(&records, &OutcomeVocabulary::default());

        assert_eq!(normalized[0].region_name, "Waru");
        assert_eq!(normalized[1].region_name, "Taman");
    }

    #[test]
    fn interprets_flags_through_vocabulary() {
        let records = vec![
            record("A", "Ya"),
            record("A", "y"),
            record("A", "TIDAK"),
            record("A", "t"),
        ];
        let normalized = normalize_records(&records, &OutcomeVocabulary::default());

        let flags: Vec<bool> = normalized.iter().map(|r| r.has_condition).collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn defaults_unrecognized_flags_to_negative() {
        let records = vec![record("A", "maybe"), record("A", ""), record("A", "  ")];
        let normalized = normalize_records(&records, &OutcomeVocabulary::default());

        assert!(normalized.iter().all(|r| !r.has_condition));
    }

    #[test]
    fn keeps_record_order() {
        let records = vec![record("B", "ya"), record("A", "tidak"), record("C", "ya")];
        let normalized = normalize_records(&records, &OutcomeVocabulary::default());

        let names: Vec<&str> = normalized.iter().map(|r| r.region_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
