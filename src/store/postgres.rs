// src/store/postgres.rs - tokio-postgres implementations of the storage seams
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info};
use tokio_postgres::Row;

use super::{CompanyRecords, CompanyScope, MappingStore};
use crate::models::{clamp_confidence, CanonicalMapping, CompanyRow, IndustryUpdate, MappingType};
use crate::utils::db_connect::PgPool;

const CREATE_MAPPINGS_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS company_mappings (
        id BIGSERIAL PRIMARY KEY,
        original_name TEXT UNIQUE NOT NULL,
        canonical_name TEXT NOT NULL,
        mapping_type TEXT NOT NULL DEFAULT 'auto' CHECK (mapping_type IN ('manual', 'auto')),
        confidence_score INTEGER NOT NULL DEFAULT 100 CHECK (confidence_score BETWEEN 0 AND 100),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

const UPSERT_MAPPING_SQL: &str = "
    INSERT INTO company_mappings
        (original_name, canonical_name, mapping_type, confidence_score, created_at, updated_at)
    VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
    ON CONFLICT (original_name) DO UPDATE SET
        canonical_name = EXCLUDED.canonical_name,
        mapping_type = EXCLUDED.mapping_type,
        confidence_score = EXCLUDED.confidence_score,
        updated_at = CURRENT_TIMESTAMP";

#[derive(Clone)]
pub struct PgMappingStore {
    pool: PgPool,
}

impl PgMappingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates `company_mappings` when the web app's migrations have not.
    pub async fn ensure_table(&self) -> Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for ensure_table")?;
        conn.batch_execute(CREATE_MAPPINGS_TABLE_SQL)
            .await
            .context("Failed to create company_mappings table")?;
        info!("company_mappings table is present");
        Ok(())
    }
}

fn mapping_from_row(row: &Row) -> Result<CanonicalMapping> {
    let mapping_type: String = row.try_get("mapping_type").context("mapping_type")?;
    let confidence: i32 = row.try_get("confidence_score").context("confidence_score")?;
    let created_at: NaiveDateTime = row.try_get("created_at").context("created_at")?;
    let updated_at: NaiveDateTime = row.try_get("updated_at").context("updated_at")?;
    Ok(CanonicalMapping {
        original_name: row.try_get("original_name").context("original_name")?,
        canonical_name: row.try_get("canonical_name").context("canonical_name")?,
        mapping_type: MappingType::from_db(&mapping_type),
        confidence_score: clamp_confidence(i64::from(confidence)),
        created_at,
        updated_at,
    })
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn find_mapping(&self, original_name: &str, min_confidence: u8) -> Result<Option<String>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for find_mapping")?;
        let row = conn
            .query_opt(
                "SELECT canonical_name FROM company_mappings
                 WHERE original_name = $1 AND confidence_score >= $2",
                &[&original_name, &i32::from(min_confidence)],
            )
            .await
            .with_context(|| format!("Failed to look up mapping for '{}'", original_name))?;
        Ok(row.map(|r| r.get::<_, String>("canonical_name")))
    }

    async fn canonical_names(&self, min_confidence: u8) -> Result<Vec<String>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for canonical_names")?;
        let rows = conn
            .query(
                "SELECT canonical_name FROM company_mappings
                 WHERE confidence_score >= $1
                 GROUP BY canonical_name
                 ORDER BY MIN(id)",
                &[&i32::from(min_confidence)],
            )
            .await
            .context("Failed to query canonical names")?;
        debug!("Loaded {} canonical names (confidence >= {})", rows.len(), min_confidence);
        Ok(rows.iter().map(|r| r.get::<_, String>("canonical_name")).collect())
    }

    async fn upsert_mapping(
        &self,
        original_name: &str,
        canonical_name: &str,
        mapping_type: MappingType,
        confidence_score: u8,
    ) -> Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for upsert_mapping")?;
        conn.execute(
            UPSERT_MAPPING_SQL,
            &[
                &original_name,
                &canonical_name,
                &mapping_type.as_str(),
                &i32::from(confidence_score),
            ],
        )
        .await
        .with_context(|| {
            format!(
                "Failed to upsert mapping '{}' -> '{}'",
                original_name, canonical_name
            )
        })?;
        debug!(
            "Upserted {} mapping '{}' -> '{}' ({})",
            mapping_type, original_name, canonical_name, confidence_score
        );
        Ok(())
    }

    async fn list_mappings(&self) -> Result<Vec<CanonicalMapping>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for list_mappings")?;
        let rows = conn
            .query(
                "SELECT original_name, canonical_name, mapping_type, confidence_score,
                        created_at, updated_at
                 FROM company_mappings ORDER BY id",
                &[],
            )
            .await
            .context("Failed to list company mappings")?;
        rows.iter().map(mapping_from_row).collect()
    }
}

/// Reads and updates the web app's `companies` table.
#[derive(Clone)]
pub struct PgCompanyRecords {
    pool: PgPool,
}

impl PgCompanyRecords {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn company_from_row(row: &Row) -> Result<CompanyRow> {
    // The web app has used both INTEGER and BIGINT ids.
    let id = match row.try_get::<_, i64>("id") {
        Ok(id) => id,
        Err(_) => i64::from(row.try_get::<_, i32>("id").context("companies.id")?),
    };
    Ok(CompanyRow {
        id,
        name: row.try_get("name").context("companies.name")?,
        industry: row.try_get("industry").context("companies.industry")?,
        canonical_name: row
            .try_get("canonical_name")
            .context("companies.canonical_name")?,
    })
}

#[async_trait]
impl CompanyRecords for PgCompanyRecords {
    async fn companies(&self, scope: CompanyScope) -> Result<Vec<CompanyRow>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for companies")?;

        const SELECT: &str = "SELECT id, name, industry, canonical_name FROM companies";
        let rows = match scope {
            CompanyScope::MissingCanonicalName => {
                conn.query(
                    &format!("{SELECT} WHERE canonical_name IS NULL OR TRIM(canonical_name) = '' ORDER BY id"),
                    &[],
                )
                .await
            }
            CompanyScope::MissingIndustry { limit } => {
                conn.query(
                    &format!(
                        "{SELECT} WHERE industry IS NULL OR TRIM(industry) = '' OR industry = 'Unknown'
                         ORDER BY id LIMIT $1"
                    ),
                    &[&limit],
                )
                .await
            }
            CompanyScope::WithIndustry => {
                conn.query(
                    &format!("{SELECT} WHERE industry IS NOT NULL AND TRIM(industry) <> '' ORDER BY id"),
                    &[],
                )
                .await
            }
            CompanyScope::All => conn.query(&format!("{SELECT} ORDER BY id"), &[]).await,
        }
        .with_context(|| format!("Failed to query companies for {:?}", scope))?;

        rows.iter().map(company_from_row).collect()
    }

    async fn set_canonical_name(&self, company_id: i64, canonical_name: &str) -> Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for set_canonical_name")?;
        conn.execute(
            "UPDATE companies
             SET canonical_name = $1, updated_at = CURRENT_TIMESTAMP
             WHERE id = $2::BIGINT",
            &[&canonical_name, &company_id],
        )
        .await
        .with_context(|| format!("Failed to update canonical name of company {}", company_id))?;
        Ok(())
    }

    async fn set_industry(&self, company_id: i64, update: &IndustryUpdate) -> Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get DB connection for set_industry")?;
        conn.execute(
            "UPDATE companies
             SET industry = $1, industry_method = $2, industry_confidence = $3::INTEGER,
                 industry_source = $4, updated_at = CURRENT_TIMESTAMP
             WHERE id = $5::BIGINT",
            &[
                &update.industry,
                &update.method,
                &i32::from(update.confidence),
                &update.source,
                &company_id,
            ],
        )
        .await
        .with_context(|| format!("Failed to update industry of company {}", company_id))?;
        Ok(())
    }
}
