//! Provenance policy: decides whether a review topic is grounded in the
//! teaching corpus or requires external sourcing.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Label reported when a topic is backed by the teacher's material.
pub const INFO_SOURCE_MATERIAL: &str = "Material provisto por el Profesor";
/// Label reported when a topic falls outside the teacher's material.
pub const INFO_SOURCE_EXTERNAL: &str = "Fuentes externas de confianza";

/// Human-readable provenance label for a coverage flag.
pub fn info_source_label(from_training_material: bool) -> &'static str {
    if from_training_material {
        INFO_SOURCE_MATERIAL
    } else {
        INFO_SOURCE_EXTERNAL
    }
}

/// Estimates whether the corpus covers a topic.
///
/// The engine only depends on this trait, so the policy can be replaced
/// with a more precise relevance test without touching the orchestration.
pub trait CoverageEstimator: Send + Sync {
    fn covers(&self, corpus: &str, topic: &str) -> bool;
}

/// Default policy: case-insensitive substring test over the full blob.
pub struct SubstringCoverage;

impl CoverageEstimator for SubstringCoverage {
    fn covers(&self, corpus: &str, topic: &str) -> bool {
        let topic = topic.trim();
        if topic.is_empty() {
            return false;
        }
        corpus.to_lowercase().contains(&topic.to_lowercase())
    }
}

/// Fuzzy line-level matching, for corpora where exact wording drifts
/// (accents, plurals, OCR noise from PDF extraction). Not wired in by
/// default.
pub struct FuzzyCoverage {
    min_score: i64,
}

impl FuzzyCoverage {
    pub fn new(min_score: i64) -> Self {
        Self { min_score }
    }
}

impl Default for FuzzyCoverage {
    fn default() -> Self {
        Self::new(60)
    }
}

impl CoverageEstimator for FuzzyCoverage {
    fn covers(&self, corpus: &str, topic: &str) -> bool {
        let topic = topic.trim();
        if topic.is_empty() {
            return false;
        }
        let matcher = SkimMatcherV2::default();
        corpus.lines().any(|line| {
            matcher
                .fuzzy_match(line, topic)
                .is_some_and(|score| score >= self.min_score)
        })
    }
}
