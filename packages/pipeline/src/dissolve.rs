//! Geometry dissolution.
//!
//! Several boundary features can carry the same region name (a region split
//! across administrative sub-areas). Dissolution unions them into one
//! geometry per distinct trimmed name.

use std::collections::BTreeMap;

use geo::{BooleanOps, MultiPolygon};
use prevalence_map_boundary_models::{BoundaryFeature, DissolvedRegion};

/// Merges features into one region per distinct trimmed name.
///
/// Regions come out ordered by name. That order is the table order for every
/// downstream stage, so reruns over identical inputs produce identical
/// tables.
#[must_use]
pub fn dissolve(features: Vec<BoundaryFeature>) -> Vec<DissolvedRegion> {
    let mut groups: BTreeMap<String, Vec<MultiPolygon<f64>>> = BTreeMap::new();
    for feature in features {
        let region_name = feature.region_name.trim().to_string();
        groups.entry(region_name).or_default().push(feature.geometry);
    }

    groups
        .into_iter()
        .filter_map(|(region_name, parts)| {
            let mut parts = parts.into_iter();
            let first = parts.next()?;
            let boundary = parts.fold(first, |merged, part| merged.union(&part));
            Some(DissolvedRegion {
                region_name,
                boundary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{Area, LineString, Polygon};

    use super::*;

    fn square(origin_x: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![
                (origin_x, 0.0),
                (origin_x + 1.0, 0.0),
                (origin_x + 1.0, 1.0),
                (origin_x, 1.0),
                (origin_x, 0.0),
            ]),
            vec![],
        )])
    }

    fn feature(region_name: &str, origin_x: f64) -> BoundaryFeature {
        BoundaryFeature::new(region_name.to_string(), square(origin_x))
    }

    #[test]
    fn merges_features_sharing_a_name() {
        let dissolved = dissolve(vec![
            feature("Waru", 0.0),
            feature("Waru", 2.0),
            feature("Taman", 5.0),
        ]);

        assert_eq!(dissolved.len(), 2);
        let waru = dissolved
            .iter()
            .find(|region| region.region_name == "Waru")
            .unwrap();
        assert!((waru.boundary.unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn unions_overlapping_features_without_double_counting() {
        let dissolved = dissolve(vec![feature("Waru", 0.0), feature("Waru", 0.5)]);

        assert_eq!(dissolved.len(), 1);
        assert!((dissolved[0].boundary.unsigned_area() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn joins_names_after_trimming() {
        let dissolved = dissolve(vec![feature(" Waru ", 0.0), feature("Waru", 2.0)]);

        assert_eq!(dissolved.len(), 1);
        assert_eq!(dissolved[0].region_name, "Waru");
        assert!((dissolved[0].boundary.unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn orders_regions_by_name() {
        let dissolved = dissolve(vec![
            feature("Waru", 0.0),
            feature("Krembung", 2.0),
            feature("Taman", 4.0),
        ]);

        let names: Vec<&str> = dissolved
            .iter()
            .map(|region| region.region_name.as_str())
            .collect();
        assert_eq!(names, vec!["Krembung", "Taman", "Waru"]);
    }

    #[test]
    fn keeps_single_feature_geometry_unchanged() {
        let geometry = square(0.0);
        let dissolved = dissolve(vec![BoundaryFeature::new(
            "Waru".to_string(),
            geometry.clone(),
        )]);

        assert_eq!(dissolved[0].boundary, geometry);
    }

    #[test]
    fn empty_input_yields_no_regions() {
        assert!(dissolve(Vec::new()).is_empty());
    }
}
