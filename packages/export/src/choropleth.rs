//! Choropleth GeoJSON artifact.
//!
//! One feature per region in table order, dissolved geometry as the feature
//! geometry and the summary row as camelCase properties. A map frontend can
//! style fills straight from the `color` property without re-deriving the
//! tier.

use std::io::Write;
use std::path::Path;

use geojson::{Feature, FeatureCollection, JsonObject};
use prevalence_map_pipeline::SummaryTable;

use crate::ExportError;

/// Builds the choropleth `FeatureCollection` for a table.
///
/// # Errors
///
/// Returns an error if a summary row fails to serialize to JSON.
pub fn choropleth_feature_collection(
    table: &SummaryTable,
) -> Result<FeatureCollection, ExportError> {
    let mut features = Vec::with_capacity(table.len());

    for region in &table.regions {
        let properties = match serde_json::to_value(&region.summary)? {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        };

        features.push(Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(
                &region.boundary,
            ))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Writes the choropleth GeoJSON.
///
/// `source` labels the destination in errors; the file writer passes the
/// path.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_choropleth_geojson(
    mut writer: impl Write,
    source: &str,
    table: &SummaryTable,
) -> Result<(), ExportError> {
    let collection = choropleth_feature_collection(table)?;
    serde_json::to_writer(&mut writer, &collection)?;
    writer.flush().map_err(|e| ExportError::Io {
        path: source.to_string(),
        source: e,
    })?;
    Ok(())
}

/// Writes the choropleth GeoJSON to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the write fails.
pub fn write_choropleth_geojson_file(path: &Path, table: &SummaryTable) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    write_choropleth_geojson(
        std::io::BufWriter::new(file),
        &path.display().to_string(),
        table,
    )?;
    log::info!("wrote choropleth GeoJSON to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use geo::{LineString, MultiPolygon, Polygon};
    use prevalence_map_pipeline::SummaryRegion;
    use prevalence_map_summary_models::{PrevalenceTier, RegionSummary};

    use super::*;

    fn region(
        name: &str,
        cases: u64,
        subjects: u64,
        rate_percent: f64,
        rank: u32,
    ) -> SummaryRegion {
        let category = PrevalenceTier::from_rate_percent(rate_percent);
        SummaryRegion {
            summary: RegionSummary {
                region_name: name.to_string(),
                mean_rate: rate_percent / 100.0,
                case_count: cases,
                subject_count: subjects,
                rate_percent,
                category,
                color: category.color().to_string(),
                rank,
            },
            boundary: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![
                    (0.0, 0.0),
                    (1.0, 0.0),
                    (1.0, 1.0),
                    (0.0, 1.0),
                    (0.0, 0.0),
                ]),
                vec![],
            )]),
        }
    }

    fn sample_table() -> SummaryTable {
        SummaryTable {
            regions: vec![
                region("Taman", 0, 0, 0.0, 0),
                region("Waru", 1, 2, 50.0, 1),
            ],
        }
    }

    fn geojson_value(table: &SummaryTable) -> serde_json::Value {
        let mut buffer = Vec::new();
        write_choropleth_geojson(&mut buffer, "test.geojson", table).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn emits_one_feature_per_region_in_table_order() {
        let value = geojson_value(&sample_table());

        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["regionName"], "Taman");
        assert_eq!(features[1]["properties"]["regionName"], "Waru");
    }

    #[test]
    fn properties_carry_the_camel_case_summary_row() {
        let value = geojson_value(&sample_table());

        let properties = &value["features"][1]["properties"];
        assert_eq!(properties["subjectCount"], 2);
        assert_eq!(properties["caseCount"], 1);
        assert_eq!(properties["ratePercent"], 50.0);
        assert_eq!(properties["category"], "High");
        assert_eq!(properties["color"], "#ef4444");
        assert_eq!(properties["rank"], 1);
    }

    #[test]
    fn no_data_rows_serialize_with_their_label() {
        let value = geojson_value(&sample_table());

        let properties = &value["features"][0]["properties"];
        assert_eq!(properties["category"], "No Data");
        assert_eq!(properties["color"], "#94a3b8");
        assert_eq!(properties["rank"], 0);
    }

    #[test]
    fn geometry_serializes_as_multipolygon() {
        let value = geojson_value(&sample_table());

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["geometry"]["type"], "MultiPolygon");
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        let table = sample_table();

        let mut first = Vec::new();
        write_choropleth_geojson(&mut first, "test.geojson", &table).unwrap();
        let mut second = Vec::new();
        write_choropleth_geojson(&mut second, "test.geojson", &table).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_table_serializes_to_an_empty_collection() {
        let value = geojson_value(&SummaryTable::default());

        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }
}
