//! Storage layer for the expense tracker
//!
//! Expenses live in a CSV file, the budget in a one-line text file. Whole-file
//! rewrites go through an atomic temp-file-and-rename.

pub mod budget;
pub mod expenses;
pub mod file_io;

pub use budget::BudgetRepository;
pub use expenses::{ExpenseRepository, LoadReport, SkippedRow};
pub use file_io::{read_optional_string, write_atomic};

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub expenses: ExpenseRepository,
    pub budget: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<LoadReport, TrackerError> {
        let report = self.expenses.load()?;
        self.budget.load()?;
        Ok(report)
    }

    /// Save expenses to disk
    ///
    /// The budget is written whenever it changes, so only expenses need saving.
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.expenses.save()
    }
}
