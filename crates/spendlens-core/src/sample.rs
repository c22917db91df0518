//! Sample ledger generation
//!
//! Produces a plausible ledger for demos and first runs: random dates over
//! the trailing six months, a per-category amount range, heavier weekend
//! dining and entertainment, and occasional notes. Output is a CSV that
//! [`load_csv`](crate::import::load_csv) reads back unchanged.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Days, Months, NaiveDate};
use csv::Writer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::stats::round_to;

pub const DEFAULT_SAMPLE_RECORDS: usize = 200;

const SAMPLE_MONTHS: u32 = 6;

/// Category with its (min, max) amount per transaction
const SAMPLE_CATEGORIES: [(&str, f64, f64); 9] = [
    ("Groceries", 20.0, 150.0),
    ("Dining", 15.0, 80.0),
    ("Transport", 5.0, 50.0),
    ("Entertainment", 10.0, 100.0),
    ("Shopping", 25.0, 200.0),
    ("Utilities", 50.0, 300.0),
    ("Healthcare", 20.0, 200.0),
    ("Gas", 30.0, 80.0),
    ("Coffee", 3.0, 15.0),
];

/// Categories that cost more on Saturdays and Sundays
const WEEKEND_BIASED: [&str; 2] = ["Dining", "Entertainment"];
const WEEKEND_MULTIPLIER: f64 = 1.3;

const NOTE_PROBABILITY: f64 = 0.3;
const SAMPLE_NOTES: [&str; 6] = [
    "Regular purchase",
    "Special occasion",
    "Bulk buy",
    "Emergency",
    "Planned expense",
    "Impulse buy",
];

/// Generate `records` transactions ending on `end`, sorted by date
pub fn generate_sample_ledger<R: Rng + ?Sized>(
    rng: &mut R,
    records: usize,
    end: NaiveDate,
) -> Vec<Transaction> {
    let start = end
        .checked_sub_months(Months::new(SAMPLE_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    let span = (end - start).num_days().max(0) as u64;

    let mut transactions: Vec<Transaction> = (0..records)
        .map(|_| {
            let date = start
                .checked_add_days(Days::new(rng.gen_range(0..=span)))
                .unwrap_or(end);
            let (category, min, max) = SAMPLE_CATEGORIES[rng.gen_range(0..SAMPLE_CATEGORIES.len())];

            let mut tx = Transaction::new(date, category, rng.gen_range(min..max));
            if tx.is_weekend && WEEKEND_BIASED.contains(&category) {
                tx.amount *= WEEKEND_MULTIPLIER;
            }
            tx.amount = round_to(tx.amount, 2);

            if rng.gen_bool(NOTE_PROBABILITY) {
                if let Some(note) = SAMPLE_NOTES.choose(rng) {
                    tx = tx.with_notes(*note);
                }
            }
            tx
        })
        .collect();

    transactions.sort_by_key(|t| t.date);
    transactions
}

/// Write transactions as a `date,category,amount,notes` CSV
pub fn write_ledger_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["date", "category", "amount", "notes"])?;

    for tx in transactions {
        wtr.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.category.clone(),
            format!("{:.2}", tx.amount),
            tx.notes.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Create a sample ledger file ending today
///
/// A `seed` makes the output reproducible. Returns the number of records
/// written.
pub fn create_sample_ledger(path: &Path, records: usize, seed: Option<u64>) -> Result<usize> {
    if records == 0 {
        return Err(Error::InvalidData(
            "a sample ledger needs at least one record".into(),
        ));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = chrono::Local::now().date_naive();
    let transactions = generate_sample_ledger(&mut rng, records, today);

    let file = File::create(path)?;
    write_ledger_csv(&transactions, file)?;

    info!(
        path = %path.display(),
        records = transactions.len(),
        "Created sample ledger"
    );
    Ok(transactions.len())
}
