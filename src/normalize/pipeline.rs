// src/normalize/pipeline.rs - Full raw-name to canonical-name flow used by imports and backfills
use anyhow::Result;
use log::warn;

use super::known_names::CompanyNameMapper;
use super::mapping_service::CompanyMappingService;
use crate::models::MappingType;

/// Confidence given to administrator-seeded mappings.
pub const SEEDED_MAPPING_CONFIDENCE: u8 = 100;

/// Static alias table first, then the mapping service.
#[derive(Clone)]
pub struct NormalizationPipeline {
    mapper: CompanyNameMapper,
    service: CompanyMappingService,
}

impl NormalizationPipeline {
    pub fn new(mapper: CompanyNameMapper, service: CompanyMappingService) -> Self {
        Self { mapper, service }
    }

    pub async fn canonicalize(&self, company_name: &str) -> Result<String> {
        if let Some(canonical) = self.mapper.map_exact(company_name) {
            return Ok(canonical);
        }
        self.service.normalize(company_name).await
    }

    /// Never fails: a storage error is logged and the trimmed input returned.
    pub async fn canonicalize_or_original(&self, company_name: &str) -> String {
        match self.canonicalize(company_name).await {
            Ok(canonical) => canonical,
            Err(e) => {
                warn!(
                    "Failed to normalize '{}', keeping original name. Error: {:#}",
                    company_name, e
                );
                company_name.trim().to_string()
            }
        }
    }

    pub async fn seed_mapping(&self, original_name: &str, canonical_name: &str) -> Result<()> {
        self.service
            .create_mapping(
                original_name,
                canonical_name,
                MappingType::Manual,
                SEEDED_MAPPING_CONFIDENCE,
            )
            .await
    }
}
