//! Expense entry
//!
//! Collects expense fields from command-line flags, prompting for whatever
//! is missing, and validates each field as soon as it is known.

use std::io::{BufRead, Write};

use clap::Args;

use crate::error::TrackerResult;
use crate::services::ExpenseService;
use crate::storage::Storage;
use crate::validation::{
    normalize_category, parse_amount, parse_date, validate_description, RawExpense,
};

use super::prompt::Prompt;

/// Arguments for `expense add`
#[derive(Args, Debug, Default, Clone)]
pub struct AddArgs {
    /// Expense date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Category label, e.g. Food or Travel
    #[arg(short, long)]
    pub category: Option<String>,
    /// Amount, e.g. 12.50
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    /// Short description
    #[arg(short = 'n', long)]
    pub description: Option<String>,
}

/// Handle `expense add`: the validated expense is appended to the CSV file
pub fn handle_add_command<R: BufRead, W: Write>(
    storage: &Storage,
    symbol: &str,
    args: AddArgs,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<()> {
    let raw = read_expense(prompt, args)?;
    let expense = ExpenseService::new(storage).record(raw)?;

    prompt.say(format!(
        "Added {} expense of {} on {}.",
        expense.category,
        expense.amount.format_with_symbol(symbol),
        expense.date_string()
    ))
}

/// Gather all four fields, failing on the first invalid one
pub fn read_expense<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    args: AddArgs,
) -> TrackerResult<RawExpense> {
    let date = field(prompt, args.date, "Enter date (YYYY-MM-DD): ")?;
    parse_date(&date)?;

    let category = field(prompt, args.category, "Enter category (e.g., Food, Travel): ")?;
    normalize_category(&category)?;

    let amount = field(prompt, args.amount, "Enter amount (e.g., 12.50): ")?;
    parse_amount(&amount)?;

    let description = field(prompt, args.description, "Enter a brief description: ")?;
    validate_description(&description)?;

    Ok(RawExpense::new(date, category, amount, description))
}

fn field<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    given: Option<String>,
    question: &str,
) -> TrackerResult<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt.ask_required(question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_all_flags_no_prompting() {
        let (_temp_dir, storage) = create_test_storage();
        let mut p = prompt("");
        let args = AddArgs {
            date: Some("2025-01-15".into()),
            category: Some("food".into()),
            amount: Some("12.5".into()),
            description: Some("Lunch".into()),
        };

        handle_add_command(&storage, "$", args, &mut p).unwrap();

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output, "Added Food expense of $12.50 on 2025-01-15.\n");
        assert_eq!(storage.expenses.count().unwrap(), 1);
        assert!(storage.expenses.path().exists());
    }

    #[test]
    fn test_prompts_for_missing_fields() {
        let mut p = prompt("travel\nTrain ticket\n");
        let args = AddArgs {
            date: Some("2025-01-15".into()),
            amount: Some("42".into()),
            ..AddArgs::default()
        };

        let raw = read_expense(&mut p, args).unwrap();
        assert_eq!(raw, RawExpense::new("2025-01-15", "travel", "42", "Train ticket"));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(
            output,
            "Enter category (e.g., Food, Travel): Enter a brief description: "
        );
    }

    #[test]
    fn test_stops_at_first_invalid_field() {
        let mut p = prompt("not-a-date\nFood\n");

        let err = read_expense(&mut p, AddArgs::default()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Please use YYYY-MM-DD.");

        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(!output.contains("Enter category"));
    }

    #[test]
    fn test_invalid_expense_not_written() {
        let (_temp_dir, storage) = create_test_storage();
        let mut p = prompt("");
        let args = AddArgs {
            date: Some("2025-01-15".into()),
            category: Some("Food".into()),
            amount: Some("-1".into()),
            description: Some("Refund".into()),
        };

        let err = handle_add_command(&storage, "$", args, &mut p).unwrap_err();
        assert_eq!(err.to_string(), "Amount cannot be negative.");
        assert!(!storage.expenses.path().exists());
    }
}
