//! Summary CSV artifact.
//!
//! One row per region, descending by percentage so the worst regions read
//! first, unsurveyed regions last. Percentages render with exactly two
//! decimals; rank renders as a bare integer, 0 meaning unranked.

use std::io::Write;
use std::path::Path;

use prevalence_map_pipeline::SummaryTable;

use crate::ExportError;

/// Column headers of the summary CSV.
pub const SUMMARY_CSV_HEADER: [&str; 6] = [
    "region",
    "subject_count",
    "case_count",
    "rate_percent",
    "category",
    "rank",
];

/// Writes the summary table as CSV.
///
/// `source` labels the destination in errors; the file writer passes the
/// path.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_summary_csv(
    writer: impl Write,
    source: &str,
    table: &SummaryTable,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SUMMARY_CSV_HEADER)?;

    for region in table.by_rate_descending() {
        let row = &region.summary;
        csv_writer.write_record(&[
            row.region_name.clone(),
            row.subject_count.to_string(),
            row.case_count.to_string(),
            format!("{:.2}", row.rate_percent),
            row.category.to_string(),
            row.rank.to_string(),
        ])?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: source.to_string(),
        source: e,
    })?;
    Ok(())
}

/// Writes the summary CSV to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the write fails.
pub fn write_summary_csv_file(path: &Path, table: &SummaryTable) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    write_summary_csv(
        std::io::BufWriter::new(file),
        &path.display().to_string(),
        table,
    )?;
    log::info!("wrote summary CSV to {}", path.display());
    Ok(())
}
