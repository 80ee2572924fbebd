// src/classify/industry.rs - Rule-based industry classification from a company name
use log::warn;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label used when no industry can be inferred.
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

const FALLBACK_MIN_CONFIDENCE: i64 = 10;
const FALLBACK_MAX_CONFIDENCE: i64 = 30;

/// (pattern, industry, priority). Lower priority numbers are more specific.
/// Order matters only for readability; every rule is evaluated.
const INDUSTRY_RULES: &[(&str, &str, u8)] = &[
    // named companies
    (
        r"(?i)\b(apple|google|microsoft|amazon|meta|facebook|netflix|tesla|twitter|x corp|intel)\b",
        "Technology",
        1,
    ),
    (
        r"(?i)\b(jpmorgan|goldman|bank of america|wells fargo|morgan stanley)\b",
        "Financial Services",
        1,
    ),
    (
        r"(?i)\b(johnson & johnson|pfizer|merck|abbvie|bristol myers|eli lilly)\b",
        "Healthcare",
        1,
    ),
    (
        r"(?i)\b(walmart|target|costco|home depot|lowes|kroger)\b",
        "Consumer Defensive",
        1,
    ),
    (
        r"(?i)\b(uber|lyft|airbnb|doordash|instacart)\b",
        "Consumer Cyclical",
        1,
    ),
    // keyword groups
    (
        r"(?i)(software|tech|digital|cloud|ai|cyber|data|analytics|automation)",
        "Technology",
        2,
    ),
    (
        r"(?i)(bank|finance|financial|credit|loan|investment|insurance)",
        "Financial Services",
        2,
    ),
    (
        r"(?i)(health|medical|pharma|biotech|clinical|therapy|hospital)",
        "Healthcare",
        2,
    ),
    (
        r"(?i)(retail|store|e-?commerce|shopping|consumer|restaurant|food)",
        "Consumer Cyclical",
        2,
    ),
    (
        r"(?i)(grocery|beverage|supermarket|wholesale|distribution)",
        "Consumer Defensive",
        2,
    ),
    (
        r"(?i)(manufacturing|industrial|factory|production|engineering)",
        "Industrials",
        2,
    ),
    (r"(?i)(energy|oil|gas|renewable|solar|wind|mining)", "Energy", 2),
    (
        r"(?i)(real estate|property|construction|building|housing)",
        "Real Estate",
        2,
    ),
    (
        r"(?i)(communication|telecom|media|entertainment|cable|satellite)",
        "Communication Services",
        2,
    ),
    (
        r"(?i)(material|chemical|metal|mining|commodity)",
        "Basic Materials",
        2,
    ),
    (r"(?i)(utility|power|electric|water|gas utility)", "Utilities", 2),
    // generic corporate words
    (
        r"(?i)(corp|corporation|inc|llc|company|ltd|limited)",
        UNKNOWN_INDUSTRY,
        3,
    ),
];

#[derive(Debug, Clone)]
pub struct IndustryRule {
    pub pattern: Regex,
    pub industry: &'static str,
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryClassification {
    pub industry: String,
    pub confidence: u8,
}

impl IndustryClassification {
    fn unknown() -> Self {
        Self {
            industry: UNKNOWN_INDUSTRY.to_string(),
            confidence: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.industry == UNKNOWN_INDUSTRY
    }
}

#[derive(Debug, Clone)]
pub struct IndustryClassifier {
    rules: Vec<IndustryRule>,
}

impl Default for IndustryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IndustryClassifier {
    pub fn new() -> Self {
        let mut rules = Vec::with_capacity(INDUSTRY_RULES.len());
        for &(pattern, industry, priority) in INDUSTRY_RULES {
            match Regex::new(pattern) {
                Ok(regex) => rules.push(IndustryRule {
                    pattern: regex,
                    industry,
                    priority,
                }),
                Err(e) => warn!("Invalid industry pattern '{}'. Error: {}", pattern, e),
            }
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[IndustryRule] {
        &self.rules
    }

    /// Every rule is tried; the lowest priority number decides the label and
    /// the number of matching rules raises the confidence.
    pub fn classify(&self, company_name: &str) -> IndustryClassification {
        let name = company_name.trim().to_lowercase();
        if name.is_empty() {
            return IndustryClassification::unknown();
        }

        let mut best: Option<&IndustryRule> = None;
        let mut match_count: i64 = 0;
        for rule in &self.rules {
            if rule.pattern.is_match(&name) {
                match_count += 1;
                if best.map_or(true, |b| rule.priority < b.priority) {
                    best = Some(rule);
                }
            }
        }

        let Some(best) = best else {
            return IndustryClassification::unknown();
        };

        let raw = 100 - i64::from(best.priority) * 20 + match_count * 5;
        let confidence = if best.industry == UNKNOWN_INDUSTRY {
            raw.clamp(FALLBACK_MIN_CONFIDENCE, FALLBACK_MAX_CONFIDENCE)
        } else {
            raw.clamp(10, 100)
        };

        IndustryClassification {
            industry: best.industry.to_string(),
            confidence: confidence as u8,
        }
    }

    /// Number of rules per industry label.
    pub fn rule_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for rule in &self.rules {
            *counts.entry(rule.industry).or_insert(0) += 1;
        }
        counts
    }
}
