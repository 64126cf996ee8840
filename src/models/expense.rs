//! Expense model
//!
//! A single logged expense. Records are created from validated input only
//! (see [`crate::validation`]) and are never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Date format used for input, display and the CSV file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Day the money was spent
    pub date: NaiveDate,

    /// Title-cased category label, e.g. "Food" or "Travel"
    pub category: String,

    /// Non-negative amount
    pub amount: Money,

    /// Free-text note
    pub description: String,
}

impl Expense {
    /// Create an expense from already-validated parts
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    /// The date rendered as YYYY-MM-DD
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date_string(),
            self.category,
            self.amount,
            self.description
        )
    }
}
