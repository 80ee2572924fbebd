// src/store/mod.rs - Storage seams for mappings and the external company table
pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{CanonicalMapping, CompanyRow, IndustryUpdate, MappingType};

pub use memory::{InMemoryCompanyRecords, InMemoryMappingStore};
pub use postgres::{PgCompanyRecords, PgMappingStore};

/// Persistence for `company_mappings`, keyed by `original_name`.
///
/// Doubles as the cache for fuzzy matches: a miss is computed by the matcher
/// and written back through [`MappingStore::upsert_mapping`]. Upserts replace
/// on conflict so concurrent writers for the same name are harmless.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Canonical name stored for exactly this original name, if its
    /// confidence is at least `min_confidence`.
    async fn find_mapping(&self, original_name: &str, min_confidence: u8) -> Result<Option<String>>;

    /// Distinct canonical names with confidence at least `min_confidence`,
    /// in first-inserted order.
    async fn canonical_names(&self, min_confidence: u8) -> Result<Vec<String>>;

    async fn upsert_mapping(
        &self,
        original_name: &str,
        canonical_name: &str,
        mapping_type: MappingType,
        confidence_score: u8,
    ) -> Result<()>;

    async fn list_mappings(&self) -> Result<Vec<CanonicalMapping>>;
}

/// Which company rows a canonical-name backfill visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyScope {
    /// Rows whose canonical name is NULL or empty.
    MissingCanonicalName,
    /// Rows with no industry, an empty one, or "Unknown".
    MissingIndustry { limit: i64 },
    /// Rows that already carry an industry value.
    WithIndustry,
    All,
}

/// The web app owns the `companies` table; the backfill jobs only read names
/// and write the canonical/industry columns.
#[async_trait]
pub trait CompanyRecords: Send + Sync {
    async fn companies(&self, scope: CompanyScope) -> Result<Vec<CompanyRow>>;
    async fn set_canonical_name(&self, company_id: i64, canonical_name: &str) -> Result<()>;
    async fn set_industry(&self, company_id: i64, update: &IndustryUpdate) -> Result<()>;
}
