// src/normalize/mapping_service.rs - Stored mappings plus fuzzy matching against known canonical names
use anyhow::{bail, Result};
use log::{debug, info};
use std::sync::Arc;

use super::brands::match_well_known_brand;
use super::similarity::score;
use super::suffix::strip_suffix;
use crate::config::NormalizerConfig;
use crate::models::MappingType;
use crate::store::MappingStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub canonical_name: String,
    pub score: u8,
}

/// Resolves company names to canonical names, remembering every fuzzy match
/// it makes so later lookups are a single stored-mapping read.
#[derive(Clone)]
pub struct CompanyMappingService {
    store: Arc<dyn MappingStore>,
    config: NormalizerConfig,
}

impl CompanyMappingService {
    pub fn new(store: Arc<dyn MappingStore>, config: NormalizerConfig) -> Self {
        Self { store, config }
    }

    /// Brand pass, then stored mapping, then fuzzy match, then the trimmed
    /// name with a conservative suffix strip. Only storage failures error.
    pub async fn normalize(&self, company_name: &str) -> Result<String> {
        let name = company_name.trim();
        if name.is_empty() {
            return Ok(name.to_string());
        }

        if let Some(brand) = match_well_known_brand(name) {
            debug!("'{}' -> '{}' (well-known brand)", name, brand);
            return Ok(brand);
        }

        if let Some(canonical) = self
            .store
            .find_mapping(name, self.config.mapping_min_confidence)
            .await?
        {
            debug!("'{}' -> '{}' (stored mapping)", name, canonical);
            return Ok(canonical);
        }

        if let Some(found) = self.find_best_fuzzy_match(name).await? {
            self.store
                .upsert_mapping(
                    name,
                    &found.canonical_name,
                    MappingType::Auto,
                    self.config.auto_mapping_confidence,
                )
                .await?;
            info!(
                "Fuzzy matched '{}' -> '{}' (score {}), saved as auto mapping",
                name, found.canonical_name, found.score
            );
            return Ok(found.canonical_name);
        }

        Ok(strip_suffix(name))
    }

    /// Best-scoring trusted canonical name at or above the fuzzy threshold.
    /// Ties go to the candidate stored first.
    pub async fn find_best_fuzzy_match(&self, company_name: &str) -> Result<Option<FuzzyMatch>> {
        let candidates = self
            .store
            .canonical_names(self.config.candidate_min_confidence)
            .await?;

        let mut best: Option<FuzzyMatch> = None;
        for candidate in candidates {
            let candidate_score = score(company_name, &candidate);
            if candidate_score < self.config.fuzzy_min_score {
                continue;
            }
            if best.as_ref().map_or(true, |b| candidate_score > b.score) {
                best = Some(FuzzyMatch {
                    canonical_name: candidate,
                    score: candidate_score,
                });
            }
        }
        Ok(best)
    }

    pub async fn create_mapping(
        &self,
        original_name: &str,
        canonical_name: &str,
        mapping_type: MappingType,
        confidence_score: u8,
    ) -> Result<()> {
        let original = original_name.trim();
        let canonical = canonical_name.trim();
        if original.is_empty() || canonical.is_empty() {
            bail!("mapping names must not be empty");
        }
        if confidence_score > 100 {
            bail!("confidence_score must be within 0..=100, got {}", confidence_score);
        }
        self.store
            .upsert_mapping(original, canonical, mapping_type, confidence_score)
            .await
    }
}
