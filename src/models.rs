// src/models.rs - Shared data types for mappings and company records
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a canonical mapping came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    /// Seeded by an administrator.
    Manual,
    /// Discovered by the fuzzy matcher.
    Auto,
}

impl MappingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingType::Manual => "manual",
            MappingType::Auto => "auto",
        }
    }

    /// Unknown values read back from storage are treated as `Auto`.
    pub fn from_db(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "manual" => MappingType::Manual,
            _ => MappingType::Auto,
        }
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `company_mappings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMapping {
    pub original_name: String,
    pub canonical_name: String,
    pub mapping_type: MappingType,
    pub confidence_score: u8,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Clamps any integer into the 0..=100 confidence range.
pub fn clamp_confidence(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// The slice of the external `companies` row that the backfill jobs read.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub canonical_name: Option<String>,
}

/// Industry fields written back onto a company record.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryUpdate {
    pub industry: String,
    pub confidence: u8,
    pub method: &'static str,
    pub source: &'static str,
}
