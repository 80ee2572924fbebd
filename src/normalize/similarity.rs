// src/normalize/similarity.rs - 0..=100 similarity between two company names
use strsim::levenshtein;

use super::clean::clean;

/// Words ignored by the token-overlap comparison.
pub const STOPWORDS: [&str; 13] = [
    "the", "and", "or", "of", "to", "a", "an", "for", "by", "with", "as", "at", "from",
];

/// Tokens this short never take part in token overlap.
pub const MIN_TOKEN_LENGTH: usize = 3;
/// Tokens longer than this are only compared by equality/containment.
pub const MAX_EDIT_DISTANCE_TOKEN_LENGTH: usize = 6;

const CONTAINMENT_BASE_SCORE: usize = 80;
const CONTAINMENT_LENGTH_BONUS: usize = 20;

/// Scores how alike two company names are, from 0 (unrelated) to 100 (same
/// name once punctuation, case and spacing are ignored).
pub fn score(name1: &str, name2: &str) -> u8 {
    let clean1 = clean(name1);
    let clean2 = clean(name2);

    if clean1 == clean2 {
        return 100;
    }

    // a single empty side would otherwise "contain" every candidate
    if clean1.is_empty() || clean2.is_empty() {
        return 0;
    }

    if clean1.contains(clean2.as_str()) || clean2.contains(clean1.as_str()) {
        let (len1, len2) = (clean1.chars().count(), clean2.chars().count());
        let (shorter, longer) = (len1.min(len2), len1.max(len2));
        let bonus = shorter * CONTAINMENT_LENGTH_BONUS / longer;
        return (CONTAINMENT_BASE_SCORE + bonus).min(100) as u8;
    }

    let tokens1 = tokenize(&clean1);
    let tokens2 = tokenize(&clean2);
    let total_tokens = tokens1.len() + tokens2.len();
    if total_tokens == 0 {
        return 0;
    }

    let matched = tokens1
        .iter()
        .filter(|w1| tokens2.iter().any(|w2| words_similar(w1, w2)))
        .count();

    (matched * 2 * 100 / total_tokens).min(100) as u8
}

/// Splits an already-cleaned name into comparison tokens.
pub fn tokenize(cleaned: &str) -> Vec<String> {
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_LENGTH && !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Equal, one contains the other, or short words one edit apart.
pub fn words_similar(w1: &str, w2: &str) -> bool {
    if w1 == w2 || w1.contains(w2) || w2.contains(w1) {
        return true;
    }
    if w1.chars().count() <= MAX_EDIT_DISTANCE_TOKEN_LENGTH
        && w2.chars().count() <= MAX_EDIT_DISTANCE_TOKEN_LENGTH
    {
        return edit_distance(w1, w2) <= 1;
    }
    false
}

/// Levenshtein distance with unit cost for insert, delete and substitute.
pub fn edit_distance(s1: &str, s2: &str) -> usize {
    levenshtein(s1, s2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("abc", "abd"), 1);
        assert_eq!(edit_distance("abc", "xyz"), 3);
        assert_eq!(edit_distance("", "a"), 1);
        assert_eq!(edit_distance("apple", "apply"), 1);
    }

    #[test]
    fn test_similarity_scoring_minimums() {
        let cases = [
            ("Apple Inc", "Apple", 80),
            ("Google LLC", "Google", 80),
            ("Microsoft Corporation", "Microsoft", 80),
            ("IBM Corp", "IBM", 80),
            ("Tesla Motors", "Tesla", 70),
            ("Amazon.com Inc", "Amazon", 60),
        ];
        for (a, b, min_score) in cases {
            let s = score(a, b);
            assert!(s >= min_score, "{} vs {} = {} (expected >= {})", a, b, s, min_score);
        }
    }

    #[test]
    fn test_identical_names_score_100() {
        assert_eq!(score("Acme Widgets", "Acme Widgets"), 100);
        assert_eq!(score("ACME, Widgets!", "acme widgets"), 100);
    }

    #[test]
    fn test_containment_bonus() {
        // "microsoft" (9) inside "microsoft corp" (14): 80 + 9*20/14 = 92
        assert_eq!(score("Microsoft Corp", "Microsoft"), 92);
        assert_eq!(score("Microsoft", "Microsoft Corp"), 92);
    }

    #[test]
    fn test_token_overlap() {
        // tokens: [northwind, traders, holdings] vs [northwind, trader, group]
        // northwind matches, traders contains trader, holdings has no partner
        assert_eq!(score("Northwind Traders Holdings", "Northwind Trader Group"), 66);
        assert_eq!(
            score("Northwind Traders Holdings", "Northwind Trader Group"),
            score("Northwind Trader Group", "Northwind Traders Holdings")
        );
    }

    #[test]
    fn test_short_tokens_allow_one_edit() {
        // acme/acne are one edit apart, both short
        assert_eq!(score("Acme Rockets", "Acne Rockets"), 100);
        // long tokens need equality or containment
        assert_eq!(score("Consolidated Rockets", "Consolodated Rockets"), 50);
    }

    #[test]
    fn test_stopwords_and_short_tokens_are_ignored() {
        assert_eq!(tokenize("the bank of new york co"), vec!["bank", "new", "york"]);
        assert_eq!(score("of the an", "by at as"), 0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(score("", "Apple"), 0);
        assert_eq!(score("!!!", "Apple"), 0);
    }

    #[test]
    fn test_names_that_both_clean_to_nothing_are_equal() {
        assert_eq!(score("!!", "??"), 100);
        assert_eq!(score("", "  "), 100);
    }

    #[test]
    fn test_score_never_exceeds_100() {
        assert!(score("alpha alphax alphay", "alpha omega") <= 100);
    }
}
