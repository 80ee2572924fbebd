// src/normalize/mod.rs - Company name normalization
pub mod brands;
pub mod clean;
pub mod known_names;
pub mod mapping_service;
pub mod pipeline;
pub mod similarity;
pub mod suffix;

pub use brands::match_well_known_brand;
pub use clean::{capitalize_first, clean, clean_for_display};
pub use known_names::CompanyNameMapper;
pub use mapping_service::{CompanyMappingService, FuzzyMatch};
pub use pipeline::NormalizationPipeline;
pub use similarity::{edit_distance, score};
pub use suffix::strip_suffix;
