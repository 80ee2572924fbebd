// src/classify/mod.rs - Industry labels from company names and NAICS-style codes
pub mod industry;
pub mod naics;

pub use industry::{IndustryClassification, IndustryClassifier, UNKNOWN_INDUSTRY};
pub use naics::NaicsTranslator;
