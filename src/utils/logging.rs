// src/utils/logging.rs - Logging helpers for the backfill jobs
use log::{debug, info, warn};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    CanonicalNames,
    IndustryRules,
    IndustryCodes,
    WarnImport,
}

#[derive(Clone)]
pub struct JobLogger {
    job_name: &'static str,
    job_emoji: &'static str,
    start_time: Instant,
}

impl JobLogger {
    pub fn new(kind: JobKind) -> Self {
        let (job_name, job_emoji) = match kind {
            JobKind::CanonicalNames => ("CANONICAL", "🏷️"),
            JobKind::IndustryRules => ("INDUSTRY", "🏭"),
            JobKind::IndustryCodes => ("NAICS", "🔢"),
            JobKind::WarnImport => ("WARN", "📄"),
        };
        Self {
            job_name,
            job_emoji,
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, details: &str) {
        info!(
            "[{}] {} 🚀 Starting {} job ({})",
            self.job_name,
            self.job_emoji,
            self.job_name.to_lowercase(),
            details
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        match details {
            Some(details) => info!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                self.job_name, self.job_emoji, phase, details, elapsed
            ),
            None => info!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                self.job_name, self.job_emoji, phase, elapsed
            ),
        }
    }

    pub fn log_progress(&self, processed: usize, total: usize) {
        info!(
            "[{}] {} 📊 Processed {}/{} rows so far",
            self.job_name, self.job_emoji, processed, total
        );
    }

    pub fn log_row_failure(&self, row: &str, error: &anyhow::Error) {
        warn!(
            "[{}] {} ⚠️  Skipping {}: {:#}",
            self.job_name, self.job_emoji, row, error
        );
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", self.job_name, self.job_emoji, message);
    }

    pub fn log_completion(&self, updated: usize, skipped: usize, failed: usize) {
        info!(
            "[{}] {} ✅ Completed in {:.2}s: {} updated, {} skipped, {} failed",
            self.job_name,
            self.job_emoji,
            self.start_time.elapsed().as_secs_f32(),
            updated,
            skipped,
            failed
        );
    }
}
