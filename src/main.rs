// src/main.rs - Command line entry point for company normalization and industry backfills
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use layoff_normalizer::classify::{IndustryClassifier, NaicsTranslator};
use layoff_normalizer::config::NormalizerConfig;
use layoff_normalizer::jobs::{
    classify_company_industries, reclassify_from_codes, update_canonical_names, BackfillReport,
    CanonicalScope, DEFAULT_CLASSIFY_LIMIT,
};
use layoff_normalizer::normalize::{CompanyMappingService, CompanyNameMapper, NormalizationPipeline};
use layoff_normalizer::store::{InMemoryMappingStore, MappingStore, PgCompanyRecords, PgMappingStore};
use layoff_normalizer::utils::db_connect::{connect, get_pool_status, PgPool};
use layoff_normalizer::utils::env::load_env;
use layoff_normalizer::utils::progress::ProgressConfig;
use layoff_normalizer::warn_import::read_warn_csv;
use log::info;
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Company name normalization and industry classification", long_about = None)]
struct Cli {
    /// Keep mappings in memory instead of Postgres
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical name of each company name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the rule-based industry of each company name
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Translate NAICS-style codes into industry labels
    Translate {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Store a manual mapping at full confidence
    Seed { original: String, canonical: String },
    /// List stored mappings as JSON lines
    Mappings,
    /// Create the company_mappings table if it is missing
    InitDb,
    /// Fill canonical names on company records
    BackfillCanonical {
        /// Recompute every company, not only those without a canonical name
        #[arg(long)]
        all: bool,
    },
    /// Classify companies that have no industry yet
    ClassifyCompanies {
        #[arg(long, default_value_t = DEFAULT_CLASSIFY_LIMIT)]
        limit: i64,
    },
    /// Re-translate industry values that still hold raw codes
    ReclassifyCodes,
    /// Parse a WARN CSV export and print normalized records as JSON lines
    InspectWarn { file: PathBuf },
}

struct Storage {
    mappings: Arc<dyn MappingStore>,
    pool: Option<PgPool>,
}

impl Storage {
    async fn open(offline: bool) -> Result<Self> {
        if offline {
            info!("Offline mode: mappings are kept in memory for this run");
            return Ok(Self {
                mappings: Arc::new(InMemoryMappingStore::new()),
                pool: None,
            });
        }
        let pool = connect().await.context("Failed to connect to database")?;
        let (connections, idle) = get_pool_status(&pool);
        info!(
            "Connected to database (pool: {} connections, {} idle)",
            connections, idle
        );
        Ok(Self {
            mappings: Arc::new(PgMappingStore::new(pool.clone())),
            pool: Some(pool),
        })
    }

    fn pool(&self) -> Result<&PgPool> {
        match &self.pool {
            Some(pool) => Ok(pool),
            None => bail!("this command needs the companies table and cannot run with --offline"),
        }
    }

    fn pipeline(&self) -> NormalizationPipeline {
        NormalizationPipeline::new(
            CompanyNameMapper::new(),
            CompanyMappingService::new(self.mappings.clone(), NormalizerConfig::from_env()),
        )
    }
}

fn print_report(job: &str, report: &BackfillReport) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string(&json!({ "job": job, "report": report }))?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    load_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Classify { names } => {
            let classifier = IndustryClassifier::new();
            for name in names {
                let result = classifier.classify(&name);
                println!("{}\t{}\t{}", name, result.industry, result.confidence);
            }
            Ok(())
        }
        Command::Translate { codes } => {
            let translator = NaicsTranslator::new();
            for code in codes {
                println!("{}\t{}", code, translator.translate(&code));
            }
            Ok(())
        }
        command => run_with_storage(command, cli.offline).await,
    }
}

async fn run_with_storage(command: Command, offline: bool) -> Result<()> {
    let storage = Storage::open(offline).await?;
    let progress = ProgressConfig::from_env();

    match command {
        Command::Normalize { names } => {
            let pipeline = storage.pipeline();
            for name in names {
                let canonical = pipeline.canonicalize(&name).await?;
                println!("{}\t{}", name, canonical);
            }
        }
        Command::Seed { original, canonical } => {
            storage.pipeline().seed_mapping(&original, &canonical).await?;
            info!("Seeded mapping '{}' -> '{}'", original, canonical);
        }
        Command::Mappings => {
            for mapping in storage.mappings.list_mappings().await? {
                println!("{}", serde_json::to_string(&mapping)?);
            }
        }
        Command::InitDb => {
            PgMappingStore::new(storage.pool()?.clone())
                .ensure_table()
                .await?;
        }
        Command::BackfillCanonical { all } => {
            let records = PgCompanyRecords::new(storage.pool()?.clone());
            let scope = if all {
                CanonicalScope::All
            } else {
                CanonicalScope::MissingOnly
            };
            let report =
                update_canonical_names(&records, &storage.pipeline(), scope, &progress).await?;
            print_report("backfill-canonical", &report)?;
        }
        Command::ClassifyCompanies { limit } => {
            let records = PgCompanyRecords::new(storage.pool()?.clone());
            let report =
                classify_company_industries(&records, &IndustryClassifier::new(), limit, &progress)
                    .await?;
            print_report("classify-companies", &report)?;
        }
        Command::ReclassifyCodes => {
            let records = PgCompanyRecords::new(storage.pool()?.clone());
            let report = reclassify_from_codes(&records, &NaicsTranslator::new(), &progress).await?;
            print_report("reclassify-codes", &report)?;
        }
        Command::InspectWarn { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open {}", file.display()))?;
            let batch = read_warn_csv(BufReader::new(reader), &NaicsTranslator::new())?;
            let pipeline = storage.pipeline();
            let classifier = IndustryClassifier::new();
            for record in &batch.records {
                let canonical = pipeline.canonicalize_or_original(&record.company).await;
                let by_name = classifier.classify(&canonical);
                println!(
                    "{}",
                    serde_json::to_string(&json!({
                        "record": record,
                        "canonical_name": canonical,
                        "name_industry": by_name,
                    }))?
                );
            }
            info!(
                "{} rows read, {} parsed, {} skipped",
                batch.processed,
                batch.records.len(),
                batch.skipped
            );
        }
        Command::Classify { .. } | Command::Translate { .. } => {}
    }
    Ok(())
}
