// src/normalize/suffix.rs - Conservative corporate suffix removal
use super::clean::capitalize_first;

/// Names shorter than this are left alone.
pub const MIN_STRIPPABLE_LENGTH: usize = 15;

/// Names mentioning one of these are never modified.
pub const PROTECTED_BRANDS: [&str; 8] = [
    "apple", "google", "amazon", "microsoft", "meta", "facebook", "twitter", "netflix",
];

/// Most specific first; at most one is removed.
pub const CORPORATE_SUFFIXES: [&str; 10] = [
    " corporation",
    " incorporated",
    " inc.",
    " inc",
    " corp.",
    " corp",
    " llc",
    " llp",
    " ltd.",
    " ltd",
];

pub fn should_strip_suffix(name: &str) -> bool {
    if name.chars().count() < MIN_STRIPPABLE_LENGTH {
        return false;
    }
    let lower = name.to_lowercase();
    !PROTECTED_BRANDS.iter().any(|brand| lower.contains(brand))
}

fn strip_ascii_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(cut) || !name[cut..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    Some(&name[..cut])
}

/// Removes one trailing corporate suffix from long, non-brand names. A
/// stripped name comes back lowercase with its first letter capitalized.
pub fn strip_suffix(name: &str) -> String {
    if !should_strip_suffix(name) {
        return name.to_string();
    }

    let Some(stripped) = CORPORATE_SUFFIXES
        .iter()
        .find_map(|suffix| strip_ascii_suffix_ignore_case(name, suffix))
    else {
        return name.to_string();
    };

    let stripped = stripped.trim_end_matches(|c: char| c == ',' || c.is_whitespace()).trim_start();
    let lower = stripped.to_lowercase();
    if stripped.chars().count() < 3 || lower == "the" || lower == "and" {
        return name.to_string();
    }

    // the remainder is lowercased before the first letter is raised
    capitalize_first(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_are_untouched() {
        assert_eq!(strip_suffix("Acme Corp"), "Acme Corp");
        assert_eq!(strip_suffix("Short Name Inc"), "Short Name Inc");
    }

    #[test]
    fn test_protected_brands_are_untouched() {
        assert_eq!(
            strip_suffix("Netflix Streaming Services Inc"),
            "Netflix Streaming Services Inc"
        );
        assert_eq!(strip_suffix("Meta Materials Corporation"), "Meta Materials Corporation");
    }

    #[test]
    fn test_one_suffix_removed() {
        assert_eq!(strip_suffix("Northwind Traders Corporation"), "Northwind traders");
        assert_eq!(strip_suffix("Contoso Pharmaceuticals, Inc."), "Contoso pharmaceuticals");
        assert_eq!(strip_suffix("Fabrikam Holdings Inc Ltd"), "Fabrikam holdings inc");
        assert_eq!(strip_suffix("adventure works cycles corp."), "Adventure works cycles");
    }

    #[test]
    fn test_stripped_name_is_lowercased_after_first_letter() {
        assert_eq!(strip_suffix("TAILSPIN TOYS MANUFACTURING LLC"), "Tailspin toys manufacturing");
        assert_eq!(strip_suffix("Wide World Importers Incorporated"), "Wide world importers");
    }

    #[test]
    fn test_long_names_without_suffix_are_untouched() {
        assert_eq!(strip_suffix("Wide World Importers"), "Wide World Importers");
        assert_eq!(strip_suffix("Graphic Design Institute"), "Graphic Design Institute");
    }

    #[test]
    fn test_meaningless_results_keep_original() {
        assert_eq!(strip_suffix("the          llc"), "the          llc");
        assert_eq!(strip_suffix("ab             Inc"), "ab             Inc");
    }
}
