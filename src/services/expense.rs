//! Expense service
//!
//! Business logic for recording expenses and computing spending totals.

use std::collections::HashMap;

use log::info;

use crate::error::TrackerResult;
use crate::models::{Expense, Money};
use crate::storage::Storage;
use crate::validation::RawExpense;

/// Spending total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate an expense and keep it in memory until the next save
    pub fn add(&self, input: RawExpense) -> TrackerResult<Expense> {
        let expense = input.validate()?;
        self.storage.expenses.add(expense.clone())?;

        info!("added expense, expense={}", expense);
        Ok(expense)
    }

    /// Validate an expense and append it straight to the expense file
    pub fn record(&self, input: RawExpense) -> TrackerResult<Expense> {
        let expense = input.validate()?;
        self.storage.expenses.append(expense.clone())?;

        info!("recorded expense, expense={}", expense);
        Ok(expense)
    }

    /// List all expenses in the order they were added
    pub fn list(&self) -> TrackerResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Total of every expense
    pub fn total_spent(&self) -> TrackerResult<Money> {
        Ok(self.list()?.iter().map(|e| e.amount).sum())
    }

    /// Totals per category, largest first, ties broken by name
    pub fn totals_by_category(&self) -> TrackerResult<Vec<CategoryTotal>> {
        Ok(totals_by_category(&self.list()?))
    }
}

/// Group expenses by category, largest total first, ties broken by name
pub fn totals_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let entry = by_category
            .entry(expense.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}
