// src/config.rs - Thresholds for stored-mapping lookups and fuzzy matching
use log::debug;
use std::env;

/// Thresholds used by the company mapping service. Every value is a
/// confidence or similarity score in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// A stored mapping is trusted when its confidence is at least this.
    pub mapping_min_confidence: u8,
    /// Canonical names become fuzzy candidates at this confidence.
    pub candidate_min_confidence: u8,
    /// Lowest similarity score accepted as a fuzzy match.
    pub fuzzy_min_score: u8,
    /// Confidence written for mappings discovered by fuzzy matching.
    pub auto_mapping_confidence: u8,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            mapping_min_confidence: 80,
            candidate_min_confidence: 90,
            fuzzy_min_score: 60,
            auto_mapping_confidence: 75,
        }
    }
}

fn score_from_env(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|v| v.clamp(0, 100) as u8)
        .unwrap_or(default)
}

impl NormalizerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            mapping_min_confidence: score_from_env(
                "NORMALIZER_MAPPING_MIN_CONFIDENCE",
                defaults.mapping_min_confidence,
            ),
            candidate_min_confidence: score_from_env(
                "NORMALIZER_CANDIDATE_MIN_CONFIDENCE",
                defaults.candidate_min_confidence,
            ),
            fuzzy_min_score: score_from_env("NORMALIZER_FUZZY_MIN_SCORE", defaults.fuzzy_min_score),
            auto_mapping_confidence: score_from_env(
                "NORMALIZER_AUTO_MAPPING_CONFIDENCE",
                defaults.auto_mapping_confidence,
            ),
        };
        debug!("Normalizer config: {:?}", config);
        config
    }
}
