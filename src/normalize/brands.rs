// src/normalize/brands.rs - Hard-coded short-circuit for very common brands
use super::clean::{capitalize_first, clean};

/// How the canonical name of a matched brand is produced.
#[derive(Debug, Clone, Copy)]
pub enum BrandCanonical {
    Fixed(&'static str),
    /// Keep the cleaned name minus these words, first letter capitalized.
    DropWords {
        words: &'static [&'static str],
        fallback: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct BrandRule {
    pub canonical: BrandCanonical,
    /// Matches when any of these substrings is present.
    pub any_of: &'static [&'static str],
    /// Also matches when every one of these substrings is present.
    pub all_of: &'static [&'static str],
    /// Never matches when one of these is present.
    pub none_of: &'static [&'static str],
}

const fn fixed(
    name: &'static str,
    any_of: &'static [&'static str],
    none_of: &'static [&'static str],
) -> BrandRule {
    BrandRule {
        canonical: BrandCanonical::Fixed(name),
        any_of,
        all_of: &[],
        none_of,
    }
}

/// Checked in order; the first hit wins.
pub const BRAND_RULES: &[BrandRule] = &[
    BrandRule {
        canonical: BrandCanonical::Fixed("A&P"),
        any_of: &["a&p", "great atlantic and pacific tea"],
        all_of: &["atlantic", "pacific"],
        none_of: &[],
    },
    fixed("Boeing", &["boeing"], &[]),
    fixed("Intel", &["intel"], &["intelli"]),
    fixed("Wells Fargo", &["wells fargo"], &[]),
    fixed("Bank of America", &["bank of america"], &[]),
    fixed("Walmart", &["walmart"], &[]),
    fixed("Microsoft", &["microsoft"], &[]),
    fixed("Google", &["google", "alphabet"], &[]),
    fixed("Amazon", &["amazon"], &[]),
    fixed("Meta", &["meta", "facebook"], &[]),
    fixed("Apple", &["apple"], &["pineapple"]),
    BrandRule {
        canonical: BrandCanonical::DropWords {
            words: &["motors", "inc"],
            fallback: "Tesla",
        },
        any_of: &["tesla"],
        all_of: &[],
        none_of: &[],
    },
];

impl BrandRule {
    fn matches(&self, raw_lower: &str, cleaned: &str) -> bool {
        let contains = |needle: &&str| raw_lower.contains(*needle) || cleaned.contains(*needle);

        if self.none_of.iter().any(contains) {
            return false;
        }
        self.any_of.iter().any(contains)
            || (!self.all_of.is_empty() && self.all_of.iter().all(contains))
    }

    fn canonical_for(&self, cleaned: &str) -> String {
        match self.canonical {
            BrandCanonical::Fixed(name) => name.to_string(),
            BrandCanonical::DropWords { words, fallback } => {
                let kept: Vec<&str> = cleaned
                    .split_whitespace()
                    .filter(|w| !words.contains(w))
                    .collect();
                if kept.is_empty() {
                    fallback.to_string()
                } else {
                    capitalize_first(&kept.join(" "))
                }
            }
        }
    }
}

/// Returns the canonical brand when the name mentions one of the well-known
/// brands, before any stored mapping is consulted.
pub fn match_well_known_brand(company_name: &str) -> Option<String> {
    let raw_lower = company_name.trim().to_lowercase();
    if raw_lower.is_empty() {
        return None;
    }
    let cleaned = clean(&raw_lower);

    BRAND_RULES
        .iter()
        .find(|rule| rule.matches(&raw_lower, &cleaned))
        .map(|rule| rule.canonical_for(&cleaned))
}
