// src/warn_import.rs - Parsing of WARN Act notice exports (CSV) into layoff records
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::io::Read;

use crate::classify::{NaicsTranslator, UNKNOWN_INDUSTRY};
use crate::utils::logging::{JobKind, JobLogger};

const COMPANY_COLUMN: usize = 1;
const WORKERS_COLUMN: usize = 3;
const NOTICE_DATE_COLUMN: usize = 4;
const EFFECTIVE_DATE_COLUMN: usize = 5;
const INDUSTRY_COLUMN: usize = 11;
const MIN_FIELDS: usize = 4;

/// Skip reasons logged individually before going quiet.
const LOGGED_SKIPS: usize = 10;
const SKIP_SAMPLE_FIELDS: usize = 5;

const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%Y-%m-%d", "%m/%d/%y", "%Y/%m/%d", "%d/%m/%Y", "%b %d, %Y", "%B %d, %Y",
];

static DBA_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)\bd/?b/?a\b").ok());
static ADDRESS_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\d+\s+[A-Za-z]+\s+[A-Za-z]+").ok());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarnRecord {
    pub company: String,
    pub workers: u32,
    /// Notice date, or the effective date when the notice date is unusable.
    pub notice_date: Option<NaiveDate>,
    pub industry: String,
}

#[derive(Debug, Default)]
pub struct WarnBatch {
    pub records: Vec<WarnRecord>,
    pub processed: usize,
    pub skipped: usize,
}

fn clean_company(raw: &str) -> String {
    let company = raw.trim().trim_matches('"');
    let company = match DBA_PATTERN.as_ref() {
        Some(re) => re.replace_all(company, " ").into_owned(),
        None => company.to_string(),
    };
    company.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn looks_like_address(workers: &str) -> bool {
    workers.contains(" CA")
        || workers.contains(" NY")
        || ADDRESS_PATTERN
            .as_ref()
            .map_or(false, |re| re.is_match(workers))
        || workers.split_whitespace().count() > 3
}

fn parse_workers(raw: &str) -> Result<u32> {
    let workers = raw.trim().replace(',', "");
    if looks_like_address(&workers) {
        bail!("worker count appears to be address data: {}", workers);
    }
    match workers.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => bail!("invalid worker count: {}", workers),
    }
}

fn parse_date_exact(value: &str) -> Option<NaiveDate> {
    let plausible = |date: NaiveDate| (1900..=2100).contains(&date.year());

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            if plausible(date) {
                return Some(date);
            }
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive()).filter(|d| plausible(*d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive()).filter(|d| plausible(*d));
    }
    None
}

fn range_start(value: &str, separator: &str) -> Option<NaiveDate> {
    let start = value.split(separator).next()?.trim();
    if start.is_empty() || start == value {
        return None;
    }
    parse_date_exact(start)
}

/// Accepts the date spellings seen in state WARN exports. A range such as
/// "3/1/2024 - 3/15/2024" or "2024-03-01 - 2024-03-15" yields its start date.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    parse_date_exact(value)
        .or_else(|| range_start(value, " - "))
        .or_else(|| range_start(value, "-"))
}

fn field<S: AsRef<str>>(fields: &[S], index: usize) -> Option<&str> {
    fields
        .get(index)
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
}

pub fn parse_warn_record<S: AsRef<str>>(
    fields: &[S],
    translator: &NaicsTranslator,
) -> Result<WarnRecord> {
    if fields.len() < MIN_FIELDS {
        bail!("record too short ({} fields)", fields.len());
    }

    let company = clean_company(fields[COMPANY_COLUMN].as_ref());
    if company.is_empty() {
        bail!("empty company name");
    }

    let workers = parse_workers(fields[WORKERS_COLUMN].as_ref())?;

    let notice_date = field(fields, NOTICE_DATE_COLUMN)
        .and_then(parse_flexible_date)
        .or_else(|| field(fields, EFFECTIVE_DATE_COLUMN).and_then(parse_flexible_date));

    let industry = field(fields, INDUSTRY_COLUMN)
        .map(|code| translator.translate(code))
        .unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string());

    Ok(WarnRecord {
        company,
        workers,
        notice_date,
        industry,
    })
}

/// Reads a WARN export with a header row. Unparseable rows are counted as
/// skipped; only the first few are logged.
pub fn read_warn_csv<R: Read>(reader: R, translator: &NaicsTranslator) -> Result<WarnBatch> {
    let logger = JobLogger::new(JobKind::WarnImport);
    logger.log_start("reading CSV export");

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut batch = WarnBatch::default();
    for (index, result) in csv_reader.records().enumerate() {
        batch.processed += 1;
        let row_number = index + 2;

        let parsed = result
            .with_context(|| format!("unreadable CSV row {}", row_number))
            .and_then(|record| {
                let fields: Vec<&str> = record.iter().collect();
                parse_warn_record(&fields, translator).with_context(|| {
                    let sample: Vec<&str> =
                        fields.iter().take(SKIP_SAMPLE_FIELDS).copied().collect();
                    format!("row {} {:?}", row_number, sample)
                })
            });

        match parsed {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                if batch.skipped < LOGGED_SKIPS {
                    logger.log_row_failure(&format!("row {}", row_number), &e);
                } else if batch.skipped == LOGGED_SKIPS {
                    logger.log_debug("Skipping further invalid rows without logging");
                }
                batch.skipped += 1;
            }
        }
    }

    logger.log_completion(batch.records.len(), batch.skipped, 0);
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(fields: &[&str]) -> Result<WarnRecord> {
        parse_warn_record(fields, &NaicsTranslator::new())
    }

    #[test]
    fn test_flexible_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_flexible_date("3/1/2024"), expected);
        assert_eq!(parse_flexible_date("03/01/2024"), expected);
        assert_eq!(parse_flexible_date("2024-03-01"), expected);
        assert_eq!(parse_flexible_date("3/1/24"), expected);
        assert_eq!(parse_flexible_date("2024/03/01"), expected);
        assert_eq!(parse_flexible_date("Mar 1, 2024"), expected);
        assert_eq!(parse_flexible_date("March 1, 2024"), expected);
        assert_eq!(parse_flexible_date("2024-03-01T09:30:00Z"), expected);
        assert_eq!(parse_flexible_date("Fri, 01 Mar 2024 09:30:00 +0000"), expected);
    }

    #[test]
    fn test_day_first_dates_when_month_is_impossible() {
        assert_eq!(
            parse_flexible_date("25/12/2023"),
            NaiveDate::from_ymd_opt(2023, 12, 25)
        );
    }

    #[test]
    fn test_date_ranges_use_start() {
        assert_eq!(
            parse_flexible_date("3/1/2024 - 3/15/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_flexible_date("3/1/2024-3/15/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_iso_date_ranges_use_start() {
        assert_eq!(
            parse_flexible_date("2024-03-01 - 2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("TBD"), None);
        assert_eq!(parse_flexible_date("13/13/2024"), None);
    }

    #[test]
    fn test_parse_full_record() {
        let record = parse(&[
            "CA",
            "\"Contoso Foods dba Contoso Market\"",
            "San Jose",
            "1,250",
            "1/15/2024",
            "3/15/2024",
            "",
            "",
            "",
            "",
            "",
            "445110: Supermarkets",
        ])
        .unwrap();

        assert_eq!(record.company, "Contoso Foods Contoso Market");
        assert_eq!(record.workers, 1250);
        assert_eq!(record.notice_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(record.industry, "Retail");
    }

    #[test]
    fn test_dba_only_removed_as_a_word() {
        let record = parse(&["NY", "Adbar Logistics", "", "12"]).unwrap();
        assert_eq!(record.company, "Adbar Logistics");
        let record = parse(&["NY", "Fabrikam d/b/a Fab Co", "", "12"]).unwrap();
        assert_eq!(record.company, "Fabrikam Fab Co");
    }

    #[test]
    fn test_effective_date_fallback_and_defaults() {
        let record = parse(&["WA", "Northwind", "", "40", "TBD", "2023-06-30"]).unwrap();
        assert_eq!(record.notice_date, NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(record.industry, "Unknown");

        let record = parse(&["WA", "Northwind", "", "40"]).unwrap();
        assert_eq!(record.notice_date, None);
    }

    #[test]
    fn test_rejected_records() {
        assert!(parse(&["CA", "Contoso", ""]).is_err());
        assert!(parse(&["CA", "  \"\" ", "", "10"]).is_err());
        assert!(parse(&["CA", "Contoso", "", "0"]).is_err());
        assert!(parse(&["CA", "Contoso", "", "many"]).is_err());
        assert!(parse(&["CA", "Contoso", "", "1200 Main Street"]).is_err());
        assert!(parse(&["CA", "Contoso", "", "95110 San Jose CA"]).is_err());
    }

    #[test]
    fn test_read_warn_csv() {
        let data = "\
State,Company,City,Number of Workers,WARN Received Date,Effective Date,Closure/Layoff,Temporary/Permanent,Union,Region,County,Industry
CA,Tailspin Toys,Oakland,85,2/1/2024,4/1/2024,Layoff,Permanent,,Bay Area,Alameda,339930: Doll and Toy Manufacturing
CA,,Oakland,10,2/1/2024,,,,,,,
NY,Litware Inc,Albany,\"1,020\",Jan 5 2024,2/5/2024
TX,Short
";
        let batch = read_warn_csv(data.as_bytes(), &NaicsTranslator::new()).unwrap();

        assert_eq!(batch.processed, 4);
        assert_eq!(batch.skipped, 2);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].company, "Tailspin Toys");
        assert_eq!(batch.records[0].industry, "Manufacturing");
        assert_eq!(batch.records[1].workers, 1020);
        assert_eq!(batch.records[1].notice_date, NaiveDate::from_ymd_opt(2024, 2, 5));
    }
}
