// src/classify/naics.rs - NAICS-style code to readable industry bucket
use std::collections::HashMap;

use super::industry::UNKNOWN_INDUSTRY;

const NAICS_PREFIXES: &[(&str, &str)] = &[
    // 2-digit sectors
    ("11", "Agriculture"),
    ("21", "Mining"),
    ("22", "Utilities"),
    ("23", "Construction"),
    ("31", "Manufacturing"),
    ("32", "Manufacturing"),
    ("33", "Manufacturing"),
    ("42", "Wholesale Trade"),
    ("44", "Retail"),
    ("45", "Retail"),
    ("48", "Transportation"),
    ("49", "Transportation"),
    ("51", "Information"),
    ("52", "Finance"),
    ("53", "Real Estate"),
    ("54", "Professional Services"),
    ("55", "Management"),
    ("56", "Administrative"),
    ("61", "Education"),
    ("62", "Healthcare"),
    ("71", "Arts & Entertainment"),
    ("72", "Hospitality"),
    ("81", "Other Services"),
    ("92", "Public Administration"),
    // 3-digit subsectors
    ("111", "Agriculture"),
    ("112", "Agriculture"),
    ("113", "Agriculture"),
    ("114", "Agriculture"),
    ("115", "Agriculture"),
    ("211", "Mining"),
    ("212", "Mining"),
    ("213", "Mining"),
    ("221", "Utilities"),
    ("236", "Construction"),
    ("237", "Construction"),
    ("238", "Construction"),
    ("311", "Manufacturing"),
    ("312", "Manufacturing"),
    ("313", "Manufacturing"),
    ("314", "Manufacturing"),
    ("315", "Manufacturing"),
    ("316", "Manufacturing"),
    ("321", "Manufacturing"),
    ("322", "Manufacturing"),
    ("323", "Manufacturing"),
    ("324", "Manufacturing"),
    ("325", "Manufacturing"),
    ("326", "Manufacturing"),
    ("327", "Manufacturing"),
    ("331", "Manufacturing"),
    ("332", "Manufacturing"),
    ("333", "Manufacturing"),
    ("334", "Manufacturing"),
    ("335", "Manufacturing"),
    ("336", "Manufacturing"),
    ("337", "Manufacturing"),
    ("339", "Manufacturing"),
    ("423", "Wholesale Trade"),
    ("424", "Wholesale Trade"),
    ("425", "Wholesale Trade"),
    ("441", "Retail"),
    ("442", "Retail"),
    ("443", "Retail"),
    ("444", "Retail"),
    ("445", "Retail"),
    ("446", "Retail"),
    ("447", "Retail"),
    ("448", "Retail"),
    ("451", "Retail"),
    ("452", "Retail"),
    ("453", "Retail"),
    ("454", "Retail"),
    ("481", "Transportation"),
    ("482", "Transportation"),
    ("483", "Transportation"),
    ("484", "Transportation"),
    ("485", "Transportation"),
    ("486", "Transportation"),
    ("487", "Transportation"),
    ("488", "Transportation"),
    ("491", "Transportation"),
    ("492", "Transportation"),
    ("493", "Transportation"),
    ("511", "Information"),
    ("512", "Information"),
    ("515", "Information"),
    ("517", "Information"),
    ("518", "Information"),
    ("519", "Information"),
    ("521", "Finance"),
    ("522", "Finance"),
    ("523", "Finance"),
    ("524", "Finance"),
    ("525", "Finance"),
    ("531", "Real Estate"),
    ("532", "Real Estate"),
    ("533", "Real Estate"),
    ("541", "Professional Services"),
    ("551", "Management"),
    ("561", "Administrative"),
    ("562", "Administrative"),
    ("611", "Education"),
    ("621", "Healthcare"),
    ("622", "Healthcare"),
    ("623", "Healthcare"),
    ("624", "Healthcare"),
    ("711", "Arts & Entertainment"),
    ("712", "Arts & Entertainment"),
    ("713", "Arts & Entertainment"),
    ("721", "Hospitality"),
    ("722", "Hospitality"),
    ("811", "Other Services"),
    ("812", "Other Services"),
    ("813", "Other Services"),
    ("814", "Other Services"),
    ("921", "Public Administration"),
    ("922", "Public Administration"),
    ("923", "Public Administration"),
    ("924", "Public Administration"),
    ("925", "Public Administration"),
    ("926", "Public Administration"),
    ("927", "Public Administration"),
    ("928", "Public Administration"),
    // 4-digit refinements
    ("5610", "Administrative"),
    ("5611", "Administrative"),
    ("5612", "Administrative"),
    ("5613", "Administrative"),
    ("5614", "Administrative"),
    ("5615", "Administrative"),
    ("5616", "Administrative"),
    ("5617", "Administrative"),
    ("5619", "Administrative"),
    ("5620", "Administrative"),
    ("5621", "Administrative"),
    ("5622", "Administrative"),
    ("5629", "Administrative"),
    ("4451", "Retail"),
    ("4452", "Retail"),
    ("4453", "Retail"),
    ("4461", "Retail"),
    ("4471", "Retail"),
    ("4481", "Retail"),
    ("4482", "Retail"),
    ("4511", "Retail"),
    ("4522", "Retail"),
    ("4523", "Retail"),
    ("4531", "Retail"),
    ("4532", "Retail"),
    ("4533", "Retail"),
    ("4539", "Retail"),
    ("7223", "Restaurant"),
    ("7224", "Restaurant"),
    ("7225", "Restaurant"),
];

/// Well-known 3-digit subsectors, consulted when no table prefix matched.
const SUBSECTOR_GROUPS: &[(&[&str], &str)] = &[
    (&["111", "112", "113", "114", "115"], "Agriculture"),
    (&["211", "212", "213"], "Mining"),
    (&["221"], "Utilities"),
    (&["236", "237", "238"], "Construction"),
    (
        &[
            "311", "312", "313", "314", "315", "316", "321", "322", "323", "324", "325", "326",
            "327", "331", "332", "333", "334", "335", "336", "337", "339",
        ],
        "Manufacturing",
    ),
    (&["423", "424", "425"], "Wholesale Trade"),
    (
        &[
            "441", "442", "443", "444", "445", "446", "447", "448", "451", "452", "453", "454",
        ],
        "Retail",
    ),
    (
        &[
            "481", "482", "483", "484", "485", "486", "487", "488", "491", "492", "493",
        ],
        "Transportation",
    ),
    (&["511", "512", "515", "517", "518", "519"], "Information"),
    (&["521", "522", "523", "524", "525"], "Finance"),
    (&["531", "532", "533"], "Real Estate"),
    (&["541"], "Professional Services"),
    (&["551"], "Management"),
    (&["561", "562"], "Administrative"),
    (&["611"], "Education"),
    (&["621", "622", "623", "624"], "Healthcare"),
    (&["711", "712", "713"], "Arts & Entertainment"),
    (&["721", "722"], "Hospitality"),
    (&["811", "812", "813", "814"], "Other Services"),
    (
        &["921", "922", "923", "924", "925", "926", "927", "928"],
        "Public Administration",
    ),
];

const MIN_PREFIX_LENGTH: usize = 2;

#[derive(Debug, Clone)]
pub struct NaicsTranslator {
    prefixes: HashMap<&'static str, &'static str>,
}

impl Default for NaicsTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl NaicsTranslator {
    pub fn new() -> Self {
        Self {
            prefixes: NAICS_PREFIXES.iter().copied().collect(),
        }
    }

    /// Keeps only the leading code of values like "622: Hospitals" or
    /// "5613, 5614".
    pub fn clean_code(raw: &str) -> &str {
        let code = raw.trim();
        let code = code.split(':').next().unwrap_or(code);
        let code = code.split(',').next().unwrap_or(code);
        code.split_whitespace().next().unwrap_or("")
    }

    pub fn translate(&self, raw: &str) -> String {
        let code = Self::clean_code(raw);

        for length in (MIN_PREFIX_LENGTH..=code.len()).rev() {
            // non-ASCII input can put a char boundary mid-prefix
            let Some(prefix) = code.get(..length) else {
                continue;
            };
            if let Some(industry) = self.prefixes.get(prefix) {
                return (*industry).to_string();
            }
        }

        if let Some(subsector) = code.get(..3) {
            if let Some((_, industry)) = SUBSECTOR_GROUPS
                .iter()
                .find(|(codes, _)| codes.contains(&subsector))
            {
                return (*industry).to_string();
            }
        }

        if code.len() >= MIN_PREFIX_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
            return code.to_string();
        }

        UNKNOWN_INDUSTRY.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_after_colon_is_ignored() {
        let translator = NaicsTranslator::new();
        assert_eq!(translator.translate("622: Hospitals"), "Healthcare");
        assert_eq!(translator.translate(" 541511: Custom Computer Programming "), "Professional Services");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let translator = NaicsTranslator::new();
        assert_eq!(translator.translate("722511"), "Restaurant");
        assert_eq!(translator.translate("7225"), "Restaurant");
        assert_eq!(translator.translate("722"), "Hospitality");
        assert_eq!(translator.translate("72"), "Hospitality");
    }

    #[test]
    fn test_first_of_several_codes() {
        let translator = NaicsTranslator::new();
        assert_eq!(translator.translate("5613, 5614"), "Administrative");
        assert_eq!(translator.translate("336111 311812"), "Manufacturing");
    }

    #[test]
    fn test_unmapped_numeric_code_is_kept() {
        let translator = NaicsTranslator::new();
        assert_eq!(translator.translate("99999"), "99999");
        assert_eq!(translator.translate("99"), "99");
    }

    #[test]
    fn test_unknown() {
        let translator = NaicsTranslator::new();
        assert_eq!(translator.translate("abc"), "Unknown");
        assert_eq!(translator.translate(""), "Unknown");
        assert_eq!(translator.translate("9"), "Unknown");
        assert_eq!(translator.translate("9x9"), "Unknown");
        assert_eq!(translator.translate("é99"), "Unknown");
    }
}
