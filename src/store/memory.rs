// src/store/memory.rs - In-process stores used for offline runs and tests
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use super::{CompanyRecords, CompanyScope, MappingStore};
use crate::models::{CanonicalMapping, CompanyRow, IndustryUpdate, MappingType};

/// `company_mappings` held in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    rows: RwLock<Vec<CanonicalMapping>>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn find_mapping(&self, original_name: &str, min_confidence: u8) -> Result<Option<String>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|m| m.original_name == original_name && m.confidence_score >= min_confidence)
            .map(|m| m.canonical_name.clone()))
    }

    async fn canonical_names(&self, min_confidence: u8) -> Result<Vec<String>> {
        let rows = self.rows.read().await;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut names = Vec::new();
        for mapping in rows.iter().filter(|m| m.confidence_score >= min_confidence) {
            if seen.insert(mapping.canonical_name.as_str()) {
                names.push(mapping.canonical_name.clone());
            }
        }
        Ok(names)
    }

    async fn upsert_mapping(
        &self,
        original_name: &str,
        canonical_name: &str,
        mapping_type: MappingType,
        confidence_score: u8,
    ) -> Result<()> {
        if confidence_score > 100 {
            bail!("confidence_score {} out of range for {}", confidence_score, original_name);
        }
        let now = Utc::now().naive_utc();
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|m| m.original_name == original_name) {
            Some(existing) => {
                existing.canonical_name = canonical_name.to_string();
                existing.mapping_type = mapping_type;
                existing.confidence_score = confidence_score;
                existing.updated_at = now;
            }
            None => rows.push(CanonicalMapping {
                original_name: original_name.to_string(),
                canonical_name: canonical_name.to_string(),
                mapping_type,
                confidence_score,
                created_at: now,
                updated_at: now,
            }),
        }
        Ok(())
    }

    async fn list_mappings(&self) -> Result<Vec<CanonicalMapping>> {
        Ok(self.rows.read().await.clone())
    }
}

/// A stand-in for the web app's `companies` table.
#[derive(Debug, Default)]
pub struct InMemoryCompanyRecords {
    rows: RwLock<Vec<CompanyRow>>,
    industry_updates: RwLock<HashMap<i64, IndustryUpdate>>,
}

impl InMemoryCompanyRecords {
    pub fn new(rows: Vec<CompanyRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
            industry_updates: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, company_id: i64) -> Option<CompanyRow> {
        self.rows.read().await.iter().find(|r| r.id == company_id).cloned()
    }

    /// Last industry write for a company, with its method and source.
    pub async fn industry_update(&self, company_id: i64) -> Option<IndustryUpdate> {
        self.industry_updates.read().await.get(&company_id).cloned()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[async_trait]
impl CompanyRecords for InMemoryCompanyRecords {
    async fn companies(&self, scope: CompanyScope) -> Result<Vec<CompanyRow>> {
        let rows = self.rows.read().await;
        let selected = rows.iter().filter(|row| match scope {
            CompanyScope::MissingCanonicalName => is_blank(&row.canonical_name),
            CompanyScope::MissingIndustry { .. } => {
                is_blank(&row.industry) || row.industry.as_deref() == Some("Unknown")
            }
            CompanyScope::WithIndustry => !is_blank(&row.industry),
            CompanyScope::All => true,
        });
        let limit = match scope {
            CompanyScope::MissingIndustry { limit } => usize::try_from(limit).unwrap_or(0),
            _ => usize::MAX,
        };
        Ok(selected.take(limit).cloned().collect())
    }

    async fn set_canonical_name(&self, company_id: i64, canonical_name: &str) -> Result<()> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == company_id) else {
            bail!("company {} not found", company_id);
        };
        row.canonical_name = Some(canonical_name.to_string());
        Ok(())
    }

    async fn set_industry(&self, company_id: i64, update: &IndustryUpdate) -> Result<()> {
        {
            let mut rows = self.rows.write().await;
            let Some(row) = rows.iter_mut().find(|r| r.id == company_id) else {
                bail!("company {} not found", company_id);
            };
            row.industry = Some(update.industry.clone());
        }
        self.industry_updates
            .write()
            .await
            .insert(company_id, update.clone());
        Ok(())
    }
}
