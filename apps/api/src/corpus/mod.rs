//! Role corpus: job postings loaded once at startup from a spreadsheet or CSV file.
//!
//! A missing or malformed file never fails startup; it yields an empty corpus plus a
//! human-readable diagnostic that the API reports alongside role lists.

pub mod handlers;
pub mod insights;

use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

pub const TITLE_COLUMN: &str = "job_title";
pub const DESCRIPTION_COLUMN: &str = "job_description_text";
pub const REGION_COLUMN: &str = "company_address_region";
pub const POSTED_DATE_COLUMN: &str = "job_posted_date";

/// One posting. Titles are not unique across the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleEntry {
    pub title: String,
    pub description: String,
    pub region: Option<String>,
    pub posted_date: Option<NaiveDate>,
}

impl RoleEntry {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            region: None,
            posted_date: None,
        }
    }
}

/// Read-only, ordered collection of postings.
#[derive(Debug, Clone, Default)]
pub struct RoleCorpus {
    entries: Vec<RoleEntry>,
}

/// Result of loading a corpus file.
#[derive(Debug)]
pub struct CorpusLoad {
    pub corpus: RoleCorpus,
    pub diagnostic: Option<String>,
}

impl CorpusLoad {
    fn empty(diagnostic: String) -> Self {
        warn!("{diagnostic}");
        Self {
            corpus: RoleCorpus::default(),
            diagnostic: Some(diagnostic),
        }
    }
}

impl RoleCorpus {
    #[cfg(test)]
    pub fn from_entries(entries: Vec<RoleEntry>) -> Self {
        Self { entries }
    }

    /// Loads `.xlsx`/`.xls`/`.ods` workbooks (first sheet) or CSV files.
    pub fn load(path: impl AsRef<Path>) -> CorpusLoad {
        let path = path.as_ref();
        if !path.exists() {
            return CorpusLoad::empty(format!(
                "Role dataset not found at '{}'",
                path.display()
            ));
        }

        let table = match DatasetFormat::of(path) {
            DatasetFormat::Workbook => read_workbook(path),
            DatasetFormat::Csv => read_csv(path),
        };
        let table = match table {
            Ok(t) => t,
            Err(e) => {
                return CorpusLoad::empty(format!(
                    "Failed to read role dataset '{}': {e}",
                    path.display()
                ))
            }
        };

        let column = |name: &str| table.headers.iter().position(|h| h == name);
        let (Some(title_idx), Some(desc_idx)) = (column(TITLE_COLUMN), column(DESCRIPTION_COLUMN))
        else {
            return CorpusLoad::empty(format!(
                "Role dataset must contain '{TITLE_COLUMN}' and '{DESCRIPTION_COLUMN}' columns"
            ));
        };
        let region_idx = column(REGION_COLUMN);
        let date_idx = column(POSTED_DATE_COLUMN);

        let entries: Vec<RoleEntry> = table
            .rows
            .iter()
            .map(|row| {
                let field = |idx: usize| row.get(idx).map(|v| v.trim()).unwrap_or_default();
                RoleEntry {
                    title: field(title_idx).to_string(),
                    description: field(desc_idx).to_string(),
                    region: region_idx
                        .map(field)
                        .filter(|r| !r.is_empty())
                        .map(str::to_string),
                    posted_date: date_idx.and_then(|idx| parse_posted_date(field(idx))),
                }
            })
            .collect();

        info!(
            rows = entries.len(),
            skipped = table.skipped,
            path = %path.display(),
            "Role dataset loaded"
        );

        CorpusLoad {
            corpus: RoleCorpus { entries },
            diagnostic: None,
        }
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty descriptions of every posting with exactly this title, in corpus order.
    pub fn questions_for(&self, title: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.title == title && !e.description.is_empty())
            .map(|e| e.description.clone())
            .collect()
    }

    /// Unique titles in first-seen order.
    pub fn distinct_titles(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| !e.title.is_empty() && seen.insert(e.title.as_str()))
            .map(|e| e.title.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Workbook,
    Csv,
}

impl DatasetFormat {
    fn of(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => DatasetFormat::Workbook,
            _ => DatasetFormat::Csv,
        }
    }
}

/// Header row (trimmed) plus string cells, before column lookup.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    skipped: usize,
}

fn read_csv(path: &Path) -> anyhow::Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        match record {
            Ok(r) => rows.push(r.iter().map(str::to_string).collect()),
            Err(e) => {
                skipped += 1;
                warn!("Skipping malformed dataset row: {e}");
            }
        }
    }
    Ok(RawTable {
        headers,
        rows,
        skipped,
    })
}

/// First worksheet of a workbook. Date cells are rendered as `YYYY-MM-DD`.
fn read_workbook(path: &Path) -> anyhow::Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("workbook has no worksheets"))??;

    let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows
        .next()
        .map(|h| h.into_iter().map(|c| c.trim().to_string()).collect())
        .unwrap_or_default();

    Ok(RawTable {
        headers,
        rows: rows.collect(),
        skipped: 0,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

/// Day-level formats tried after the ISO prefix.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses a posting date: ISO `YYYY-MM-DD` (optionally followed by a time part) or one of
/// the fallback formats, with or without a trailing time. Anything else is dropped.
fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(date) = raw
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    {
        return Some(date);
    }

    let without_time = raw.split_once(' ').map_or(raw, |(day, _)| day);
    FALLBACK_DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(raw, fmt)
            .or_else(|_| NaiveDate::parse_from_str(without_time, fmt))
            .ok()
    })
}
