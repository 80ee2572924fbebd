pub mod backfill;

pub use backfill::{
    classify_company_industries, reclassify_from_codes, update_canonical_names, BackfillReport,
    CanonicalScope, DEFAULT_CLASSIFY_LIMIT,
};
