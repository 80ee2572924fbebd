// src/normalize/clean.rs - Punctuation and whitespace cleaning for company names

/// Lowercases, strips everything but letters, digits and whitespace, and
/// collapses whitespace. Used for comparisons only.
pub fn clean(name: &str) -> String {
    clean_for_display(&name.to_lowercase())
}

/// Same punctuation and whitespace handling as [`clean`] but keeps casing.
pub fn clean_for_display(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
