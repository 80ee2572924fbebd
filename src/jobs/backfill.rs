// src/jobs/backfill.rs - Batch jobs that fill canonical names and industries on company records
use anyhow::Result;
use log::debug;
use serde::Serialize;

use crate::classify::{IndustryClassifier, NaicsTranslator, UNKNOWN_INDUSTRY};
use crate::models::{CompanyRow, IndustryUpdate};
use crate::normalize::NormalizationPipeline;
use crate::store::{CompanyRecords, CompanyScope};
use crate::utils::logging::{JobKind, JobLogger};
use crate::utils::progress::ProgressConfig;

pub const DEFAULT_CLASSIFY_LIMIT: i64 = 1000;
/// Rule-based results below this are not written.
pub const MIN_RULE_CONFIDENCE: u8 = 10;
pub const RECLASSIFIED_CONFIDENCE: u8 = 90;

const RULE_METHOD: &str = "rule_based";
const RULE_SOURCE: &str = "classifier_v1";
const RECLASSIFY_METHOD: &str = "reclassified";
const RECLASSIFY_SOURCE: &str = "naics_reparse_v2";

/// Rows logged in detail at the start of a classification run.
const DETAILED_LOG_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalScope {
    MissingOnly,
    All,
}

impl CanonicalScope {
    fn company_scope(self) -> CompanyScope {
        match self {
            CanonicalScope::MissingOnly => CompanyScope::MissingCanonicalName,
            CanonicalScope::All => CompanyScope::All,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub processed: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

struct JobRun {
    logger: JobLogger,
    progress: ProgressConfig,
    report: BackfillReport,
    total: usize,
}

impl JobRun {
    fn new(kind: JobKind, progress: &ProgressConfig, total: usize) -> Self {
        Self {
            logger: JobLogger::new(kind),
            progress: progress.clone(),
            report: BackfillReport::default(),
            total,
        }
    }

    fn row_done(&mut self) {
        self.report.processed += 1;
        if self.progress.should_log(self.report.processed) {
            self.logger.log_progress(self.report.processed, self.total);
        }
    }

    fn row_failed(&mut self, company: &CompanyRow, error: &anyhow::Error) {
        self.report.failed += 1;
        self.logger
            .log_row_failure(&format!("company {} '{}'", company.id, company.name), error);
    }

    fn finish(self) -> BackfillReport {
        self.logger.log_completion(
            self.report.updated,
            self.report.skipped,
            self.report.failed,
        );
        self.report
    }
}

/// Writes the canonical name of every company in scope. A company whose name
/// cannot be normalized keeps its trimmed original; failed writes are counted
/// and the batch continues.
pub async fn update_canonical_names(
    records: &dyn CompanyRecords,
    pipeline: &NormalizationPipeline,
    scope: CanonicalScope,
    progress: &ProgressConfig,
) -> Result<BackfillReport> {
    let companies = records.companies(scope.company_scope()).await?;
    let mut run = JobRun::new(JobKind::CanonicalNames, progress, companies.len());
    run.logger
        .log_start(&format!("{} companies, scope {:?}", companies.len(), scope));

    run.logger.log_phase("Normalizing", Some("alias table, brands, stored and fuzzy mappings"));
    let pb = progress.create_bar(companies.len() as u64, "Normalizing company names");
    for company in &companies {
        let canonical = pipeline.canonicalize_or_original(&company.name).await;

        if company.canonical_name.as_deref() == Some(canonical.as_str()) {
            run.report.skipped += 1;
        } else {
            match records.set_canonical_name(company.id, &canonical).await {
                Ok(()) => {
                    debug!("Company {} '{}' -> '{}'", company.id, company.name, canonical);
                    run.report.updated += 1;
                }
                Err(e) => run.row_failed(company, &e),
            }
        }

        run.row_done();
        pb.inc(1);
    }
    pb.finish_with_message("Canonical names done");

    Ok(run.finish())
}

/// Rule-based classification for companies with no usable industry.
pub async fn classify_company_industries(
    records: &dyn CompanyRecords,
    classifier: &IndustryClassifier,
    limit: i64,
    progress: &ProgressConfig,
) -> Result<BackfillReport> {
    let companies = records
        .companies(CompanyScope::MissingIndustry { limit })
        .await?;
    let mut run = JobRun::new(JobKind::IndustryRules, progress, companies.len());
    run.logger
        .log_start(&format!("{} companies, batch limit {}", companies.len(), limit));

    run.logger.log_phase("Classifying", None);
    let pb = progress.create_bar(companies.len() as u64, "Classifying industries");
    for company in &companies {
        let result = classifier.classify(&company.name);
        if run.report.processed < DETAILED_LOG_ROWS {
            run.logger.log_debug(&format!(
                "Classifying company {} '{}': got '{}' with confidence {}",
                company.id, company.name, result.industry, result.confidence
            ));
        }

        if result.industry == UNKNOWN_INDUSTRY || result.confidence < MIN_RULE_CONFIDENCE {
            run.report.skipped += 1;
        } else {
            let update = IndustryUpdate {
                industry: result.industry,
                confidence: result.confidence,
                method: RULE_METHOD,
                source: RULE_SOURCE,
            };
            match records.set_industry(company.id, &update).await {
                Ok(()) => run.report.updated += 1,
                Err(e) => run.row_failed(company, &e),
            }
        }

        run.row_done();
        pb.inc(1);
    }
    pb.finish_with_message("Industry classification done");

    Ok(run.finish())
}

/// Re-translates stored industry values that still carry raw codes, e.g.
/// "5613, 5614" from an older import becomes "Administrative".
pub async fn reclassify_from_codes(
    records: &dyn CompanyRecords,
    translator: &NaicsTranslator,
    progress: &ProgressConfig,
) -> Result<BackfillReport> {
    let companies = records.companies(CompanyScope::WithIndustry).await?;
    let mut run = JobRun::new(JobKind::IndustryCodes, progress, companies.len());
    run.logger
        .log_start(&format!("{} companies with an industry", companies.len()));

    run.logger.log_phase("Translating codes", None);
    let pb = progress.create_bar(companies.len() as u64, "Re-reading industry codes");
    for company in &companies {
        let current = company.industry.as_deref().unwrap_or_default();
        let improved = translator.translate(current);

        if improved == current || improved == UNKNOWN_INDUSTRY {
            run.report.skipped += 1;
        } else {
            let update = IndustryUpdate {
                industry: improved,
                confidence: RECLASSIFIED_CONFIDENCE,
                method: RECLASSIFY_METHOD,
                source: RECLASSIFY_SOURCE,
            };
            match records.set_industry(company.id, &update).await {
                Ok(()) => {
                    debug!(
                        "Reclassified company {} '{}': '{}' -> '{}'",
                        company.id, company.name, current, update.industry
                    );
                    run.report.updated += 1;
                }
                Err(e) => run.row_failed(company, &e),
            }
        }

        run.row_done();
        pb.inc(1);
    }
    pb.finish_with_message("Reclassification done");

    Ok(run.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use crate::normalize::mapping_service::tests::FailingStore;
    use crate::normalize::{CompanyMappingService, CompanyNameMapper};
    use crate::store::{InMemoryCompanyRecords, InMemoryMappingStore, MappingStore};
    use std::sync::Arc;

    fn quiet() -> ProgressConfig {
        ProgressConfig {
            enabled: false,
            refresh_rate_ms: 100,
            log_every: 0,
        }
    }

    fn company(id: i64, name: &str, industry: Option<&str>, canonical: Option<&str>) -> CompanyRow {
        CompanyRow {
            id,
            name: name.to_string(),
            industry: industry.map(str::to_string),
            canonical_name: canonical.map(str::to_string),
        }
    }

    fn pipeline(store: Arc<dyn MappingStore>) -> NormalizationPipeline {
        NormalizationPipeline::new(
            CompanyNameMapper::new(),
            CompanyMappingService::new(store, NormalizerConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_update_missing_canonical_names() {
        let records = InMemoryCompanyRecords::new(vec![
            company(1, "Facebook Inc", None, None),
            company(2, "Wide World Importers Incorporated", None, Some("")),
            company(3, "Contoso", None, Some("Contoso Group")),
        ]);
        let pipeline = pipeline(Arc::new(InMemoryMappingStore::new()));

        let report = update_canonical_names(&records, &pipeline, CanonicalScope::MissingOnly, &quiet())
            .await
            .unwrap();

        assert_eq!(report, BackfillReport { processed: 2, updated: 2, skipped: 0, failed: 0 });
        assert_eq!(records.get(1).await.unwrap().canonical_name.as_deref(), Some("Meta"));
        assert_eq!(
            records.get(2).await.unwrap().canonical_name.as_deref(),
            Some("Wide world importers")
        );
        assert_eq!(
            records.get(3).await.unwrap().canonical_name.as_deref(),
            Some("Contoso Group")
        );
    }

    #[tokio::test]
    async fn test_update_all_canonical_names_skips_unchanged() {
        let records = InMemoryCompanyRecords::new(vec![
            company(1, "Google LLC", None, Some("Google")),
            company(2, "Contoso", None, Some("Contoso Group")),
        ]);
        let pipeline = pipeline(Arc::new(InMemoryMappingStore::new()));

        let report = update_canonical_names(&records, &pipeline, CanonicalScope::All, &quiet())
            .await
            .unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(records.get(2).await.unwrap().canonical_name.as_deref(), Some("Contoso"));
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_original_name() {
        let records = InMemoryCompanyRecords::new(vec![company(7, " Acme Widgets ", None, None)]);
        let pipeline = pipeline(Arc::new(FailingStore));

        let report = update_canonical_names(&records, &pipeline, CanonicalScope::MissingOnly, &quiet())
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(
            records.get(7).await.unwrap().canonical_name.as_deref(),
            Some("Acme Widgets")
        );
    }

    #[tokio::test]
    async fn test_classify_company_industries() {
        let records = InMemoryCompanyRecords::new(vec![
            company(1, "Pfizer", None, None),
            company(2, "XYZ Corp", Some("Unknown"), None),
            company(3, "First Community Bank", Some(""), None),
            company(4, "Walmart", Some("Retail"), None),
        ]);
        let classifier = IndustryClassifier::new();

        let report = classify_company_industries(&records, &classifier, DEFAULT_CLASSIFY_LIMIT, &quiet())
            .await
            .unwrap();

        assert_eq!(report, BackfillReport { processed: 3, updated: 2, skipped: 1, failed: 0 });

        let pfizer = records.industry_update(1).await.unwrap();
        assert_eq!(pfizer.industry, "Healthcare");
        assert_eq!(pfizer.confidence, 85);
        assert_eq!(pfizer.method, "rule_based");
        assert_eq!(pfizer.source, "classifier_v1");

        assert!(records.industry_update(2).await.is_none());
        assert_eq!(records.get(2).await.unwrap().industry.as_deref(), Some("Unknown"));
        assert_eq!(
            records.get(3).await.unwrap().industry.as_deref(),
            Some("Financial Services")
        );
        assert!(records.industry_update(4).await.is_none());
    }

    #[tokio::test]
    async fn test_classify_respects_batch_limit() {
        let records = InMemoryCompanyRecords::new(vec![
            company(1, "Pfizer", None, None),
            company(2, "Merck", None, None),
        ]);
        let report = classify_company_industries(&records, &IndustryClassifier::new(), 1, &quiet())
            .await
            .unwrap();
        assert_eq!(report.processed, 1);
        assert!(records.industry_update(2).await.is_none());
    }

    #[tokio::test]
    async fn test_reclassify_from_codes() {
        let records = InMemoryCompanyRecords::new(vec![
            company(1, "Contoso Staffing", Some("5613, 5614"), None),
            company(2, "Northwind Clinic", Some("622: Hospitals"), None),
            company(3, "Fabrikam", Some("Healthcare"), None),
            company(4, "Tailspin", Some("99999"), None),
            company(5, "Litware", None, None),
        ]);

        let report = reclassify_from_codes(&records, &NaicsTranslator::new(), &quiet())
            .await
            .unwrap();

        assert_eq!(report, BackfillReport { processed: 4, updated: 2, skipped: 2, failed: 0 });

        let staffing = records.industry_update(1).await.unwrap();
        assert_eq!(staffing.industry, "Administrative");
        assert_eq!(staffing.confidence, 90);
        assert_eq!(staffing.method, "reclassified");
        assert_eq!(staffing.source, "naics_reparse_v2");
        assert_eq!(records.get(2).await.unwrap().industry.as_deref(), Some("Healthcare"));
        assert_eq!(records.get(3).await.unwrap().industry.as_deref(), Some("Healthcare"));
        assert_eq!(records.get(4).await.unwrap().industry.as_deref(), Some("99999"));
    }
}
