//! Spending Summary
//!
//! Totals spending overall and per category and compares it with the budget.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::services::{BudgetService, BudgetStatus, CategoryTotal, ExpenseService};
use crate::storage::Storage;

/// Spending Summary
#[derive(Debug, Clone)]
pub struct SpendingSummary {
    /// Number of expenses included
    pub expense_count: usize,
    /// Total across all expenses
    pub total_spent: Money,
    /// Per category totals, largest first
    pub categories: Vec<CategoryTotal>,
    /// Budget comparison, if a budget is set
    pub budget: Option<BudgetStatus>,
}

impl SpendingSummary {
    /// Generate a summary of everything currently loaded
    pub fn generate(storage: &Storage) -> TrackerResult<Self> {
        let expense_service = ExpenseService::new(storage);
        let budget_service = BudgetService::new(storage);

        let expenses = expense_service.list()?;

        Ok(Self {
            expense_count: expenses.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            categories: crate::services::expense::totals_by_category(&expenses),
            budget: budget_service.status()?,
        })
    }

    /// One-line verdict on the budget
    pub fn budget_line(&self, symbol: &str) -> String {
        match &self.budget {
            None => "No monthly budget set.".to_string(),
            Some(status) if status.is_exceeded() => format!(
                "⚠️  You have exceeded your budget by {}!",
                status.overspent_by().format_with_symbol(symbol)
            ),
            Some(status) => format!(
                "✅ Within budget. Remaining: {}",
                status.remaining.format_with_symbol(symbol)
            ),
        }
    }

    /// Write the budget verdict and the category breakdown
    pub fn render_breakdown<W: Write>(&self, writer: &mut W, symbol: &str) -> TrackerResult<()> {
        let io = |e: std::io::Error| TrackerError::Io(e.to_string());

        writeln!(writer, "{}", self.budget_line(symbol)).map_err(io)?;

        if self.categories.is_empty() {
            writeln!(writer, "No spending yet to break down by category.").map_err(io)?;
            return Ok(());
        }

        writeln!(writer).map_err(io)?;
        writeln!(writer, "Spending by category:").map_err(io)?;
        for total in &self.categories {
            writeln!(
                writer,
                "  - {}: {}",
                total.category,
                total.total.format_with_symbol(symbol)
            )
            .map_err(io)?;
        }

        Ok(())
    }

    /// Write the full summary
    pub fn render<W: Write>(&self, writer: &mut W, symbol: &str) -> TrackerResult<()> {
        let io = |e: std::io::Error| TrackerError::Io(e.to_string());

        writeln!(writer, "Spending Summary").map_err(io)?;
        writeln!(writer, "{}", "=".repeat(40)).map_err(io)?;
        writeln!(writer, "{:14} {}", "Expenses:", self.expense_count).map_err(io)?;
        writeln!(
            writer,
            "{:14} {}",
            "Total spent:",
            self.total_spent.format_with_symbol(symbol)
        )
        .map_err(io)?;
        if let Some(status) = &self.budget {
            writeln!(
                writer,
                "{:14} {}",
                "Budget:",
                status.budget.format_with_symbol(symbol)
            )
            .map_err(io)?;
        }
        writeln!(writer).map_err(io)?;

        self.render_breakdown(writer, symbol)
    }
}
