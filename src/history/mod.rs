//! History module - reads an exercise log CSV into clean typed entries

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Date-only forms accepted in the Date column
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-and-time forms; the time part is discarded
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// One row of the log before any parsing, fields as written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub exercise: String,
    pub category: String,
    pub weight: String,
    pub reps: String,
}

/// One cleaned row of training history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub exercise: String,
    pub category: String,
    /// Load as logged, never negative (0 when unreadable)
    pub weight: f64,
    pub reps: Option<f64>,
}

/// What happened while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Well-formed records seen
    pub rows_read: usize,
    /// Records with the wrong field count or bad encoding
    pub malformed_skipped: usize,
    /// Rows dropped because the date could not be parsed
    pub invalid_dates: usize,
    /// Rows kept with weight forced to zero
    pub weights_defaulted: usize,
}

/// Header positions of the columns we use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    exercise: usize,
    category: usize,
    weight: usize,
    reps: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| header_matches(h, column))
                .with_context(|| format!("Missing required column '{}'", column))
        };

        Ok(Self {
            date: find("date")?,
            exercise: find("exercise")?,
            category: find("category")?,
            weight: find("weight")?,
            reps: find("reps")?,
        })
    }

    fn raw_row(&self, record: &StringRecord) -> RawRow {
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        RawRow {
            date: field(self.date),
            exercise: field(self.exercise),
            category: field(self.category),
            weight: field(self.weight),
            reps: field(self.reps),
        }
    }
}

/// "Weight (lbs)" matches "weight"; "Weighted" does not
fn header_matches(header: &str, column: &str) -> bool {
    let header = header.trim().trim_start_matches('\u{feff}').to_lowercase();
    if header == column {
        return true;
    }
    header
        .strip_prefix(column)
        .is_some_and(|rest| rest.trim_start().starts_with('('))
}

/// Parse a date column value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parse a weight; None when empty, non-numeric, non-finite or negative
pub fn parse_weight(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

pub fn parse_reps(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Normalize one row. Bad date drops the row; bad weight becomes 0.
pub fn normalize_row(row: &RawRow) -> Option<LogEntry> {
    let date = parse_date(&row.date)?;
    Some(LogEntry {
        date,
        exercise: row.exercise.clone(),
        category: row.category.clone(),
        weight: parse_weight(&row.weight).unwrap_or(0.0),
        reps: parse_reps(&row.reps),
    })
}

/// Cleaned training history, in input order
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<LogEntry>,
    report: LoadReport,
}

impl History {
    /// Load a CSV log from disk
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open log {}", path.display()))?;
        let history = Self::from_reader(file)
            .with_context(|| format!("Failed to read log {}", path.display()))?;
        info!(
            path = %path.display(),
            entries = history.entries.len(),
            "Loaded training history"
        );
        Ok(history)
    }

    /// Read a CSV log with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers().context("Unreadable header row")?.clone();
        if headers.is_empty() {
            bail!("Log has no header row");
        }
        let columns = ColumnMap::resolve(&headers)?;

        let mut rows = Vec::new();
        let mut malformed = 0;
        for result in reader.records() {
            match result {
                Ok(record) => rows.push(columns.raw_row(&record)),
                Err(e) => {
                    if let ErrorKind::Io(_) = e.kind() {
                        return Err(e).context("I/O error while reading log");
                    }
                    debug!(error = %e, "Skipping malformed record");
                    malformed += 1;
                }
            }
        }

        let mut history = Self::from_rows(rows);
        history.report.malformed_skipped = malformed;
        if malformed > 0 {
            warn!(count = malformed, "Skipped malformed records");
        }
        Ok(history)
    }

    /// Normalize already-split rows
    pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Self {
        let mut report = LoadReport::default();
        let mut entries = Vec::new();

        for row in rows {
            report.rows_read += 1;
            let Some(entry) = normalize_row(&row) else {
                debug!(date = %row.date, exercise = %row.exercise, "Dropping row with invalid date");
                report.invalid_dates += 1;
                continue;
            };
            if parse_weight(&row.weight).is_none() {
                report.weights_defaulted += 1;
            }
            entries.push(entry);
        }

        if report.invalid_dates > 0 {
            warn!(count = report.invalid_dates, "Dropped rows with invalid dates");
        }

        Self { entries, report }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
