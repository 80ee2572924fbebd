// src/normalize/known_names.rs - Exact alias table and prefix patterns for well-known companies
use log::warn;
use regex::Regex;
use std::collections::HashMap;

/// Verbatim spellings seen in imports, mapped to their canonical name.
const EXACT_ALIASES: &[(&str, &str)] = &[
    // Intel sites are listed individually so they never reach the generic pattern
    ("Intel Corporation", "Intel"),
    ("Intel", "Intel"),
    ("Intel Corporation (SC-12)", "Intel"),
    ("Intel Corporation (Robert Noyce)", "Intel"),
    ("Intel Corporation (SC-9)", "Intel"),
    ("Intel Corporation (SC-2)", "Intel"),
    ("Intel Corporation (SC-1)", "Intel"),
    ("Intel Corporation (SC-11)", "Intel"),
    ("Intel Corporation - Robert Noyce Building", "Intel"),
    ("Intel Corporation - Robert Noyce", "Intel"),
    ("Intel Corporation - SC-12", "Intel"),
    ("Intel Corporation - SC-9", "Intel"),
    ("Intel Corporation - SC-1 3065 Bowers", "Intel"),
    ("Intel Corporation - SC-2", "Intel"),
    ("Intel Corporation - SC-11", "Intel"),
    ("Intel Corporation (Robert Noyce Building)", "Intel"),
    ("Honeywell Inteligrated LLC", "Honeywell"),
    ("InteLogix", "InteLogix"),
    ("Google", "Google"),
    ("Google LLC", "Google"),
    ("Alphabet Inc.", "Google"),
    ("Alphabet", "Google"),
    ("Microsoft", "Microsoft"),
    ("Microsoft Corporation", "Microsoft"),
    ("Amazon", "Amazon"),
    ("Amazon.com", "Amazon"),
    ("Amazon.com, Inc.", "Amazon"),
    ("Amazon Web Services", "Amazon"),
    ("Meta", "Meta"),
    ("Meta Platforms", "Meta"),
    ("Meta Platforms, Inc.", "Meta"),
    ("Facebook", "Meta"),
    ("Facebook, Inc.", "Meta"),
    ("Apple", "Apple"),
    ("Apple Inc.", "Apple"),
    ("Apple Computer", "Apple"),
    ("Tesla", "Tesla"),
    ("Tesla, Inc.", "Tesla"),
    ("Netflix", "Netflix"),
    ("Netflix, Inc.", "Netflix"),
    ("Twitter", "X Corp"),
    ("X Corp", "X Corp"),
    ("X", "X Corp"),
    ("Boeing", "Boeing"),
    ("The Boeing Company", "Boeing"),
    ("Northrop Grumman", "Northrop Grumman"),
    ("Northrop Grumman Corporation", "Northrop Grumman"),
    ("United Airlines", "United Airlines"),
    ("United Airlines, Inc.", "United Airlines"),
    ("united airlines", "United Airlines"),
    ("Walmart", "Walmart"),
    ("Walmart Inc.", "Walmart"),
    ("Target", "Target"),
    ("Target Corporation", "Target"),
    ("Costco", "Costco"),
    ("Costco Wholesale", "Costco"),
    ("Home Depot", "Home Depot"),
    ("The Home Depot", "Home Depot"),
    ("Home Depot, Inc.", "Home Depot"),
    ("Lowes", "Lowe's"),
    ("Lowe's", "Lowe's"),
    ("Lowe's Companies", "Lowe's"),
    ("Kroger", "Kroger"),
    ("The Kroger Co.", "Kroger"),
    ("JPMorgan Chase", "JPMorgan Chase"),
    ("JPMorgan", "JPMorgan Chase"),
    ("J.P. Morgan", "JPMorgan Chase"),
    ("Goldman Sachs", "Goldman Sachs"),
    ("Goldman", "Goldman Sachs"),
    ("Bank of America", "Bank of America"),
    ("BOA", "Bank of America"),
    ("Wells Fargo", "Wells Fargo"),
    ("Morgan Stanley", "Morgan Stanley"),
    ("Johnson & Johnson", "Johnson & Johnson"),
    ("J&J", "Johnson & Johnson"),
    ("Pfizer", "Pfizer"),
    ("Pfizer Inc.", "Pfizer"),
    ("Merck", "Merck"),
    ("Merck & Co.", "Merck"),
    ("AbbVie", "AbbVie"),
    ("AbbVie Inc.", "AbbVie"),
    ("Bristol Myers Squibb", "Bristol Myers Squibb"),
    ("Bristol-Myers Squibb", "Bristol Myers Squibb"),
    ("Eli Lilly", "Eli Lilly"),
    ("Eli Lilly and Company", "Eli Lilly"),
];

/// Start-anchored patterns tried in order once the exact table misses.
const PREFIX_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)^intel\b.*", "Intel"),
    (r"(?i)^google\b.*", "Google"),
    (r"(?i)^microsoft\b.*", "Microsoft"),
    (r"(?i)^amazon\b.*", "Amazon"),
    (r"(?i)^meta\b.*", "Meta"),
    (r"(?i)^facebook\b.*", "Meta"),
    (r"(?i)^apple\b.*", "Apple"),
    (r"(?i)^tesla\b.*", "Tesla"),
    (r"(?i)^netflix\b.*", "Netflix"),
    (r"(?i)^twitter\b.*", "X Corp"),
    (r"(?i)^walmart\b.*", "Walmart"),
    (r"(?i)^target\b.*", "Target"),
    (r"(?i)^costco\b.*", "Costco"),
    (r"(?i)^home depot\b.*", "Home Depot"),
    (r"(?i)^lowe'?s\b.*", "Lowe's"),
    (r"(?i)^kroger\b.*", "Kroger"),
    (r"(?i)^jpmorgan\b.*", "JPMorgan Chase"),
    (r"(?i)^goldman\b.*", "Goldman Sachs"),
    (r"(?i)^bank of america\b.*", "Bank of America"),
    (r"(?i)^wells fargo\b.*", "Wells Fargo"),
    (r"(?i)^morgan stanley\b.*", "Morgan Stanley"),
    (r"(?i)^boeing\b.*", "Boeing"),
    (r"(?i)^northrop\b.*", "Northrop Grumman"),
    (r"(?i)^united airlines?\b.*", "United Airlines"),
    (r"(?i)^johnson.?&.?johnson\b.*", "Johnson & Johnson"),
    (r"(?i)^pfizer\b.*", "Pfizer"),
    (r"(?i)^merck\b.*", "Merck"),
    (r"(?i)^abbvie\b.*", "AbbVie"),
    (r"(?i)^bristol.?myers\b.*", "Bristol Myers Squibb"),
    (r"(?i)^eli lilly\b.*", "Eli Lilly"),
];

#[derive(Debug, Clone)]
pub struct CompanyPattern {
    pub pattern: Regex,
    pub company: &'static str,
}

/// Static alias lookup built once and shared read-only.
#[derive(Debug, Clone)]
pub struct CompanyNameMapper {
    aliases: HashMap<&'static str, &'static str>,
    patterns: Vec<CompanyPattern>,
}

impl Default for CompanyNameMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyNameMapper {
    pub fn new() -> Self {
        let aliases = EXACT_ALIASES.iter().copied().collect();

        let mut patterns = Vec::with_capacity(PREFIX_PATTERNS.len());
        for &(pattern, company) in PREFIX_PATTERNS {
            match Regex::new(pattern) {
                Ok(regex) => patterns.push(CompanyPattern {
                    pattern: regex,
                    company,
                }),
                Err(e) => warn!("Invalid company pattern '{}'. Error: {}", pattern, e),
            }
        }

        Self { aliases, patterns }
    }

    /// Exact alias first, then the first matching prefix pattern.
    pub fn map_exact(&self, company_name: &str) -> Option<String> {
        let name = company_name.trim();
        if name.is_empty() {
            return None;
        }

        if let Some(canonical) = self.aliases.get(name) {
            return Some((*canonical).to_string());
        }

        self.patterns
            .iter()
            .find(|p| p.pattern.is_match(name))
            .map(|p| p.company.to_string())
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_static_patterns_compile() {
        let mapper = CompanyNameMapper::new();
        assert_eq!(mapper.pattern_count(), PREFIX_PATTERNS.len());
        assert_eq!(mapper.alias_count(), EXACT_ALIASES.len());
    }

    #[test]
    fn test_exact_aliases() {
        let mapper = CompanyNameMapper::new();
        assert_eq!(mapper.map_exact("Intel Corporation").as_deref(), Some("Intel"));
        assert_eq!(mapper.map_exact("Meta Platforms, Inc.").as_deref(), Some("Meta"));
        assert_eq!(mapper.map_exact("Alphabet Inc.").as_deref(), Some("Google"));
        assert_eq!(mapper.map_exact("  J&J  ").as_deref(), Some("Johnson & Johnson"));
        assert_eq!(
            mapper.map_exact("Honeywell Inteligrated LLC").as_deref(),
            Some("Honeywell")
        );
    }

    #[test]
    fn test_exact_table_wins_over_patterns() {
        let mapper = CompanyNameMapper::new();
        // would hit ^intel\b otherwise
        assert_eq!(
            mapper.map_exact("Intel Corporation - SC-1 3065 Bowers").as_deref(),
            Some("Intel")
        );
        // would hit nothing as a pattern; the exact entry keeps its own casing
        assert_eq!(mapper.map_exact("InteLogix").as_deref(), Some("InteLogix"));
    }

    #[test]
    fn test_prefix_patterns() {
        let mapper = CompanyNameMapper::new();
        assert_eq!(mapper.map_exact("INTEL FAB 42").as_deref(), Some("Intel"));
        assert_eq!(mapper.map_exact("facebook payments").as_deref(), Some("Meta"));
        assert_eq!(mapper.map_exact("Lowes Home Centers").as_deref(), Some("Lowe's"));
        assert_eq!(
            mapper.map_exact("United Airline Holdings").as_deref(),
            Some("United Airlines")
        );
        assert_eq!(
            mapper.map_exact("Johnson and Johnson Vision").as_deref(),
            None,
            "the & is required by the pattern"
        );
        assert_eq!(
            mapper.map_exact("Johnson&Johnson Vision").as_deref(),
            Some("Johnson & Johnson")
        );
    }

    #[test]
    fn test_prefix_patterns_are_anchored_and_word_bounded() {
        let mapper = CompanyNameMapper::new();
        assert_eq!(mapper.map_exact("Intelligent Systems"), None);
        assert_eq!(mapper.map_exact("Metalworks Inc"), None);
        assert_eq!(mapper.map_exact("The Apple Orchard"), None);
    }

    #[test]
    fn test_unknown_and_empty_names() {
        let mapper = CompanyNameMapper::new();
        assert_eq!(mapper.map_exact("Acme Widgets"), None);
        assert_eq!(mapper.map_exact("   "), None);
    }
}
