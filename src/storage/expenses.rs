//! Expense repository for CSV storage
//!
//! Manages loading and saving expenses to expenses.csv. Rows keep the order
//! in which they were added.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::RwLock;

use log::debug;
use serde::Serialize;

use crate::error::TrackerError;
use crate::models::Expense;
use crate::validation::RawExpense;

use super::file_io::write_atomic;

/// Column names, in file order
pub const HEADER: [&str; 4] = ["date", "category", "amount", "description"];

/// One CSV row as written to disk
#[derive(Debug, Serialize)]
struct ExpenseRecord {
    date: String,
    category: String,
    amount: String,
    description: String,
}

impl ExpenseRecord {
    /// Value for a named column, if it is one of ours
    fn field(&self, column: &str) -> Option<&str> {
        match column {
            "date" => Some(&self.date),
            "category" => Some(&self.category),
            "amount" => Some(&self.amount),
            "description" => Some(&self.description),
            _ => None,
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            date: expense.date_string(),
            category: expense.category.clone(),
            amount: expense.amount.to_plain_string(),
            description: expense.description.clone(),
        }
    }
}

/// A row that was dropped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    /// Why the row was rejected
    pub reason: String,
}

/// Outcome of loading the expense file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of rows accepted
    pub loaded: usize,
    /// Rows that were skipped
    pub skipped: Vec<SkippedRow>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Path of the backing CSV file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load expenses from disk, replacing anything held in memory
    ///
    /// A missing file is an empty store. Incomplete or malformed rows are
    /// skipped and listed in the returned report.
    pub fn load(&self) -> Result<LoadReport, TrackerError> {
        let mut report = LoadReport::default();
        let mut expenses = Vec::new();

        if self.path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_path(&self.path)
                .map_err(|e| {
                    TrackerError::Storage(format!(
                        "Failed to open {}: {}",
                        self.path.display(),
                        e
                    ))
                })?;

            let headers = reader.headers()?.clone();

            for result in reader.records() {
                let record = match result {
                    Ok(record) => record,
                    Err(err) if err.is_io_error() => return Err(err.into()),
                    Err(err) => {
                        let line = err.position().map(|p| p.line()).unwrap_or(0);
                        debug!("skipping unreadable row, line={}, err={}", line, err);
                        report.skipped.push(SkippedRow {
                            line,
                            reason: err.to_string(),
                        });
                        continue;
                    }
                };

                let line = record.position().map(|p| p.line()).unwrap_or(0);
                let parsed = record
                    .deserialize::<RawExpense>(Some(&headers))
                    .map_err(TrackerError::from)
                    .and_then(Expense::try_from);

                match parsed {
                    Ok(expense) => expenses.push(expense),
                    Err(err) => {
                        debug!("skipping invalid row, line={}, err={}", line, err);
                        report.skipped.push(SkippedRow {
                            line,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        report.loaded = expenses.len();
        debug!(
            "loaded expenses, path={}, loaded={}, skipped={}",
            self.path.display(),
            report.loaded,
            report.skipped.len()
        );

        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = expenses;

        Ok(report)
    }

    /// Rewrite the whole file from memory
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for expense in data.iter() {
            writer.serialize(ExpenseRecord::from(expense))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TrackerError::Storage(format!("Failed to flush CSV data: {}", e)))?;

        write_atomic(&self.path, &bytes)?;
        debug!(
            "saved expenses, path={}, count={}",
            self.path.display(),
            data.len()
        );
        Ok(())
    }

    /// Add an expense in memory only
    pub fn add(&self, expense: Expense) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.push(expense);
        Ok(())
    }

    /// Append one expense to the end of the file and keep it in memory
    ///
    /// The header is written first if the file is new or empty. Otherwise
    /// the row follows the column order of the existing header; unknown
    /// columns are left blank.
    pub fn append(&self, expense: Expense) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                TrackerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let needs_header = file.metadata()?.len() == 0;
        let columns = if needs_header {
            HEADER.iter().map(|c| c.to_string()).collect()
        } else {
            self.existing_columns()?
        };

        if !needs_header && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let record = ExpenseRecord::from(&expense);
        let row: Vec<&str> = columns
            .iter()
            .map(|column| record.field(column).unwrap_or(""))
            .collect();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(HEADER)?;
        }
        writer.write_record(&row)?;
        writer.flush()?;

        self.add(expense)
    }

    /// Column names from the header of the existing file
    fn existing_columns(&self) -> Result<Vec<String>, TrackerError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        if let Some(missing) = HEADER
            .iter()
            .find(|name| !columns.iter().any(|c| c == *name))
        {
            return Err(TrackerError::Storage(format!(
                "{} has no '{}' column in its header",
                self.path.display(),
                missing
            )));
        }

        Ok(columns)
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    pub fn is_empty(&self) -> Result<bool, TrackerError> {
        Ok(self.count()? == 0)
    }
}

fn ends_with_newline(file: &mut File) -> Result<bool, TrackerError> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
