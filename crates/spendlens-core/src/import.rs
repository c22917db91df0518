//! CSV ledger import
//!
//! Accepts any CSV with `date`, `category` and `amount` columns (header
//! names are matched case-insensitively) plus optional `notes` or
//! `description`. Comma, semicolon and tab separated files are recognized
//! from the header line. Rows with an unreadable date or amount, a blank
//! category, or a non-positive amount are dropped.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionTable};

const REQUIRED_COLUMNS: [&str; 3] = ["date", "category", "amount"];
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A loaded table and how many rows were discarded on the way
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub table: TransactionTable,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Load a ledger CSV from disk
pub fn load_csv(path: &Path) -> Result<ImportOutcome> {
    let file = fs::File::open(path)?;
    let outcome = parse_csv(file)?;
    info!(
        path = %path.display(),
        records = outcome.table.len(),
        "Loaded spending records"
    );
    Ok(outcome)
}

/// Parse ledger CSV data into a validated table
pub fn parse_csv<R: Read>(mut reader: R) -> Result<ImportOutcome> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let delimiter = detect_delimiter(&data)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_slice());

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut transactions = Vec::new();
    let mut rows_read = 0;

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        rows_read += 1;
        // +2: one for the header, one for 1-based line numbers
        match parse_row(&record, &columns) {
            Ok(tx) => transactions.push(tx),
            Err(reason) => debug!(line = idx + 2, reason, "Dropping row"),
        }
    }

    let rows_dropped = rows_read - transactions.len();
    info!(
        "Cleaned data: {} -> {} records",
        rows_read,
        transactions.len()
    );

    if transactions.is_empty() {
        return Err(Error::InvalidData(format!(
            "no valid transactions found ({} rows read)",
            rows_read
        )));
    }

    Ok(ImportOutcome {
        table: TransactionTable::new(transactions)?,
        rows_read,
        rows_dropped,
    })
}

/// Pick the first delimiter whose header names every required column
fn detect_delimiter(data: &[u8]) -> Result<u8> {
    let mut first_missing = None;

    for delimiter in DELIMITERS {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(data);
        let headers = rdr.headers()?;
        let missing = missing_columns(headers);
        if missing.is_empty() {
            debug!(delimiter = %(delimiter as char).escape_default(), "Detected CSV delimiter");
            return Ok(delimiter);
        }
        first_missing.get_or_insert(missing);
    }

    Err(Error::MissingColumns(first_missing.unwrap_or_default()))
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn missing_columns(headers: &StringRecord) -> Vec<String> {
    let names: Vec<String> = headers.iter().map(normalize_header).collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|req| !names.iter().any(|n| n == *req))
        .map(|req| req.to_string())
        .collect()
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct ColumnMap {
    date: usize,
    category: usize,
    amount: usize,
    notes: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        match (find("date"), find("category"), find("amount")) {
            (Some(date), Some(category), Some(amount)) => Ok(Self {
                date,
                category,
                amount,
                notes: find("notes").or_else(|| find("description")),
            }),
            _ => Err(Error::MissingColumns(missing_columns(headers))),
        }
    }
}

fn parse_row(record: &StringRecord, columns: &ColumnMap) -> std::result::Result<Transaction, &'static str> {
    let date = record
        .get(columns.date)
        .and_then(parse_date)
        .ok_or("invalid date")?;

    let amount = record
        .get(columns.amount)
        .and_then(parse_amount)
        .ok_or("invalid amount")?;
    if amount <= 0.0 {
        return Err("non-positive amount");
    }

    let category = record.get(columns.category).unwrap_or("").trim();
    if category.is_empty() {
        return Err("missing category");
    }

    let tx = Transaction::new(date, category, amount);
    let notes = columns
        .notes
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|n| !n.is_empty());

    Ok(match notes {
        Some(notes) => tx.with_notes(notes),
        None => tx,
    })
}

/// Parse a date in one of the accepted layouts; any time of day is discarded
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Parse an amount, allowing a leading `$` and `,` thousands separators
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, raw),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest).trim();

    let cleaned = if rest.contains(',') {
        strip_thousands_separators(rest)?
    } else {
        rest.to_string()
    };

    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// "1,234,567.89" -> "1234567.89"; anything else with commas is rejected
fn strip_thousands_separators(s: &str) -> Option<String> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };

    let groups: Vec<&str> = int_part.split(',').collect();
    let well_formed = groups.iter().enumerate().all(|(i, g)| {
        let len_ok = if i == 0 {
            (1..=3).contains(&g.len())
        } else {
            g.len() == 3
        };
        len_ok && g.chars().all(|c| c.is_ascii_digit())
    });
    if !well_formed {
        return None;
    }

    let mut out = groups.concat();
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}
