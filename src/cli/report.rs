//! Listing and summary commands

use std::io::{BufRead, Write};

use crate::display::format_expense_table;
use crate::error::TrackerResult;
use crate::reports::SpendingSummary;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::prompt::Prompt;

/// Handle `expense list`
pub fn handle_list_command<R: BufRead, W: Write>(
    storage: &Storage,
    symbol: &str,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<()> {
    let expenses = ExpenseService::new(storage).list()?;
    prompt.say(format_expense_table(&expenses, symbol).trim_end())
}

/// Handle `expense summary`
pub fn handle_summary_command<R: BufRead, W: Write>(
    storage: &Storage,
    symbol: &str,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<()> {
    let summary = SpendingSummary::generate(storage)?;
    summary.render(prompt.output(), symbol)
}
