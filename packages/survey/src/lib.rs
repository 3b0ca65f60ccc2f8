#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Survey CSV adapter.
//!
//! Reads an individual-level survey CSV into [`SurveyRecord`]s. The adapter
//! is deliberately thin: it locates the two mapped columns, skips rows with a
//! blank region name, and passes cell text through untouched. Interpretation
//! of the outcome flag belongs to the pipeline.

use std::io::Read;
use std::path::Path;

use prevalence_map_survey_models::{SurveyFieldMapping, SurveyRecord};

/// Errors from loading a survey CSV.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// I/O error opening the file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV parsing error.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path or label of the CSV source.
        path: String,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// A mapped column is absent from the header row.
    #[error("column '{column}' not found in {path}")]
    MissingColumn {
        /// Path or label of the CSV source.
        path: String,
        /// The missing column header.
        column: String,
    },
}

/// Loads survey records from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the CSV cannot be parsed,
/// or either mapped column is missing from the header row.
pub fn load_survey_records(
    path: &Path,
    fields: &SurveyFieldMapping,
) -> Result<Vec<SurveyRecord>, SurveyError> {
    let file = std::fs::File::open(path).map_err(|e| SurveyError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_survey_csv(file, &path.display().to_string(), fields)
}

/// Parses survey records from any CSV byte source.
///
/// `source` labels the stream in errors and logs; the file loader passes the
/// path. Rows whose region-name cell is blank after trimming carry no usable
/// join key and are skipped, with one warning for the whole batch.
///
/// # Errors
///
/// Returns an error if the CSV cannot be parsed or either mapped column is
/// missing from the header row.
pub fn parse_survey_csv(
    reader: impl Read,
    source: &str,
    fields: &SurveyFieldMapping,
) -> Result<Vec<SurveyRecord>, SurveyError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SurveyError::Csv {
            path: source.to_string(),
            source: e,
        })?
        .clone();

    let region_index =
        column_index(&headers, &fields.region_name).ok_or_else(|| SurveyError::MissingColumn {
            path: source.to_string(),
            column: fields.region_name.clone(),
        })?;
    let outcome_index =
        column_index(&headers, &fields.outcome).ok_or_else(|| SurveyError::MissingColumn {
            path: source.to_string(),
            column: fields.outcome.clone(),
        })?;

    let mut records = Vec::new();
    let mut skipped_blank = 0_u64;

    for result in csv_reader.records() {
        let row = result.map_err(|e| SurveyError::Csv {
            path: source.to_string(),
            source: e,
        })?;

        let region_name = row.get(region_index).unwrap_or("");
        if region_name.trim().is_empty() {
            skipped_blank += 1;
            continue;
        }

        let has_condition = row.get(outcome_index).unwrap_or("");
        records.push(SurveyRecord::new(
            region_name.to_string(),
            has_condition.to_string(),
        ));
    }

    if skipped_blank > 0 {
        log::warn!("{source}: skipped {skipped_blank} rows with a blank region name");
    }
    log::info!("{source}: loaded {} survey records", records.len());

    Ok(records)
}

/// Finds a column by trimmed, case-sensitive header match.
fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_mapping() -> SurveyFieldMapping {
        SurveyFieldMapping::default()
    }

    #[test]
    fn loads_records_with_default_mapping() {
        let data = b"nama_kecamatan,stunting_balita\nWaru,Ya\nTaman,Tidak\n";
        let records = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region_name, "Waru");
        assert_eq!(records[0].has_condition, "Ya");
        assert_eq!(records[1].region_name, "Taman");
        assert_eq!(records[1].has_condition, "Tidak");
    }

    #[test]
    fn preserves_raw_cell_text() {
        let data = b"nama_kecamatan,stunting_balita\n Waru ,YA\n";
        let records = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap();

        assert_eq!(records[0].region_name, " Waru ");
        assert_eq!(records[0].has_condition, "YA");
    }

    #[test]
    fn skips_rows_with_blank_region_name() {
        let data = b"nama_kecamatan,stunting_balita\nWaru,Ya\n  ,Ya\n,Tidak\nTaman,Ya\n";
        let records = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region_name, "Waru");
        assert_eq!(records[1].region_name, "Taman");
    }

    #[test]
    fn matches_headers_after_trimming() {
        let data = b" nama_kecamatan , stunting_balita \nWaru,Ya\n";
        let records = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region_name, "Waru");
    }

    #[test]
    fn respects_custom_column_mapping() {
        let mapping = SurveyFieldMapping {
            region_name: "district".to_string(),
            outcome: "flagged".to_string(),
            ..SurveyFieldMapping::default()
        };
        let data = b"district,flagged,age\nNorth,y,4\n";
        let records = parse_survey_csv(&data[..], "test.csv", &mapping).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region_name, "North");
        assert_eq!(records[0].has_condition, "y");
    }

    #[test]
    fn ignores_unmapped_columns() {
        let data = b"id,nama_kecamatan,age,stunting_balita\n1,Waru,3,Ya\n";
        let records = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region_name, "Waru");
        assert_eq!(records[0].has_condition, "Ya");
    }

    #[test]
    fn errors_on_missing_outcome_column() {
        let data = b"nama_kecamatan,other\nWaru,x\n";
        let err = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap_err();

        match err {
            SurveyError::MissingColumn { column, .. } => {
                assert_eq!(column, "stunting_balita");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn errors_on_ragged_rows() {
        let data = b"nama_kecamatan,stunting_balita\nWaru\n";
        let err = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap_err();

        assert!(matches!(err, SurveyError::Csv { .. }));
    }

    #[test]
    fn errors_on_missing_file() {
        let err = load_survey_records(Path::new("/nonexistent/survey.csv"), &default_mapping())
            .unwrap_err();

        assert!(matches!(err, SurveyError::Io { .. }));
    }

    #[test]
    fn empty_file_with_headers_yields_no_records() {
        let data = b"nama_kecamatan,stunting_balita\n";
        let records = parse_survey_csv(&data[..], "test.csv", &default_mapping()).unwrap();

        assert!(records.is_empty());
    }
}
