//! Expense display formatting
//!
//! Renders the expense list as a terminal table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format expenses as a table followed by a totals line
pub fn format_expense_table(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses to show yet.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            date: e.date_string(),
            category: e.category.clone(),
            amount: e.amount.format_with_symbol(symbol),
            description: e.description.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.modify(Columns::single(2), Alignment::right());

    let total: Money = expenses.iter().map(|e| e.amount).sum();

    format!(
        "{}\n\n{}\n",
        table,
        format_totals_line(expenses.len(), total, symbol)
    )
}

/// "Total shown: N | Total spent: $X"
pub fn format_totals_line(shown: usize, total: Money, symbol: &str) -> String {
    format!(
        "Total shown: {}   |   Total spent: {}",
        shown,
        total.format_with_symbol(symbol)
    )
}
