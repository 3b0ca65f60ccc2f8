//! Content-hash memoization of pipeline runs.
//!
//! Interactive frontends re-trigger the pipeline on every redraw. Instead of
//! leaning on a framework cache, runs are memoized explicitly: both input
//! collections and the vocabulary are hashed into a content key, and the
//! finished table is reused while the key matches.

use std::sync::Arc;

use geo::LineString;
use prevalence_map_boundary_models::BoundaryFeature;
use prevalence_map_survey_models::{OutcomeVocabulary, SurveyRecord};
use sha2::{Digest, Sha256};

use crate::SummaryTable;

/// Content key identifying one exact pipeline input set.
pub type ContentKey = [u8; 32];

/// Single-entry memoization of pipeline runs.
///
/// Holds the table for the most recent input set. Rerunning with unchanged
/// inputs returns the cached [`Arc`] without touching geometry; any change
/// to either input or the vocabulary recomputes and replaces the entry.
#[derive(Debug, Default)]
pub struct PipelineCache {
    entry: Option<(ContentKey, Arc<SummaryTable>)>,
}

impl PipelineCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Runs the pipeline, reusing the cached table when the inputs hash to
    /// the stored key.
    pub fn run(
        &mut self,
        records: &[SurveyRecord],
        features: &[BoundaryFeature],
        vocabulary: &OutcomeVocabulary,
    ) -> Arc<SummaryTable> {
        let key = content_key(records, features, vocabulary);

        if let Some((stored, table)) = &self.entry {
            if *stored == key {
                log::debug!("pipeline cache hit for {}", short_key(&key));
                return Arc::clone(table);
            }
        }

        log::debug!("pipeline cache miss for {}", short_key(&key));
        let table = Arc::new(crate::run(records, features.to_vec(), vocabulary));
        self.entry = Some((key, Arc::clone(&table)));
        table
    }
}

/// Hashes both inputs and the vocabulary into a stable content key.
///
/// Every field is length-prefixed so adjacent values cannot collide by
/// concatenation. Geometry is hashed ring by ring with polygon, ring, and
/// coordinate counts prefixed, so a ring moved between polygons changes the
/// key even when the flattened coordinate stream does not.
#[must_use]
pub fn content_key(
    records: &[SurveyRecord],
    features: &[BoundaryFeature],
    vocabulary: &OutcomeVocabulary,
) -> ContentKey {
    let mut hasher = Sha256::new();

    hash_len(&mut hasher, vocabulary.affirmative.len());
    for token in &vocabulary.affirmative {
        hash_str(&mut hasher, token);
    }
    hash_len(&mut hasher, vocabulary.negative.len());
    for token in &vocabulary.negative {
        hash_str(&mut hasher, token);
    }

    hash_len(&mut hasher, records.len());
    for record in records {
        hash_str(&mut hasher, &record.region_name);
        hash_str(&mut hasher, &record.has_condition);
    }

    hash_len(&mut hasher, features.len());
    for feature in features {
        hash_str(&mut hasher, &feature.region_name);
        hash_len(&mut hasher, feature.geometry.0.len());
        for polygon in &feature.geometry.0 {
            hash_len(&mut hasher, 1 + polygon.interiors().len());
            hash_ring(&mut hasher, polygon.exterior());
            for ring in polygon.interiors() {
                hash_ring(&mut hasher, ring);
            }
        }
    }

    hasher.finalize().into()
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hash_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn hash_ring(hasher: &mut Sha256, ring: &LineString<f64>) {
    hash_len(hasher, ring.0.len());
    for coord in &ring.0 {
        hasher.update(coord.x.to_le_bytes());
        hasher.update(coord.y.to_le_bytes());
    }
}

#[allow(clippy::cast_possible_truncation)]
fn hash_len(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u64).to_le_bytes());
}

fn short_key(key: &ContentKey) -> String {
    hex::encode(&key[..6])
}
