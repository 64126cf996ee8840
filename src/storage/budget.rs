//! Budget repository for plain-text storage
//!
//! The budget is a single amount in budget.txt. Setting a new budget
//! overwrites the file; no history is kept.

use std::path::PathBuf;
use std::sync::RwLock;

use log::{debug, warn};

use crate::error::TrackerError;
use crate::models::Money;

use super::file_io::{read_optional_string, write_atomic};

/// Repository for the optional budget value
pub struct BudgetRepository {
    path: PathBuf,
    value: RwLock<Option<Money>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            value: RwLock::new(None),
        }
    }

    /// Path of the backing text file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the budget from disk
    ///
    /// A missing, empty or unreadable file means no budget is set.
    pub fn load(&self) -> Result<Option<Money>, TrackerError> {
        let loaded = match read_optional_string(&self.path) {
            Ok(Some(contents)) => parse_stored(&contents, &self.path),
            Ok(None) => None,
            Err(err) => {
                warn!("ignoring unreadable budget file, err={}", err);
                None
            }
        };

        let mut value = self.value.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *value = loaded;

        Ok(loaded)
    }

    /// Get the current budget
    pub fn get(&self) -> Result<Option<Money>, TrackerError> {
        let value = self.value.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(*value)
    }

    /// Overwrite the budget, both in memory and on disk
    pub fn set(&self, budget: Money) -> Result<(), TrackerError> {
        write_atomic(&self.path, budget.to_plain_string().as_bytes())?;

        let mut value = self.value.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *value = Some(budget);

        debug!("saved budget, path={}, budget={}", self.path.display(), budget);
        Ok(())
    }

    /// Remove the budget entirely
    pub fn clear(&self) -> Result<(), TrackerError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                TrackerError::Storage(format!(
                    "Failed to remove {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
        }

        let mut value = self.value.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *value = None;

        Ok(())
    }
}

fn parse_stored(contents: &str, path: &std::path::Path) -> Option<Money> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Money::parse(trimmed) {
        Ok(budget) if !budget.is_negative() => Some(budget),
        Ok(budget) => {
            warn!("ignoring negative budget, path={}, budget={}", path.display(), budget);
            None
        }
        Err(err) => {
            warn!("ignoring malformed budget, path={}, err={}", path.display(), err);
            None
        }
    }
}
