//! Budget CLI commands

use std::io::{BufRead, Write};

use clap::Subcommand;

use crate::error::TrackerResult;
use crate::reports::SpendingSummary;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::prompt::Prompt;

/// Budget subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum BudgetCommands {
    /// Show the current budget and how spending compares
    Show,

    /// Set the monthly budget, replacing any previous value
    Set {
        /// Amount (e.g., "500" or "500.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove the budget
    Clear,
}

/// Handle a budget command
pub fn handle_budget_command<R: BufRead, W: Write>(
    storage: &Storage,
    symbol: &str,
    cmd: BudgetCommands,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Show => {
            match service.current()? {
                Some(budget) => prompt.say(format!(
                    "Monthly budget: {}",
                    budget.format_with_symbol(symbol)
                ))?,
                None => {
                    prompt.say("No monthly budget set.")?;
                    prompt.say("Run 'expense budget set <AMOUNT>' to set one.")?;
                    return Ok(());
                }
            }

            let summary = SpendingSummary::generate(storage)?;
            prompt.say(summary.budget_line(symbol))
        }

        BudgetCommands::Set { amount } => {
            let budget = service.set(&amount)?;
            prompt.say(format!(
                "Budget saved: {}",
                budget.format_with_symbol(symbol)
            ))
        }

        BudgetCommands::Clear => {
            service.clear()?;
            prompt.say("Budget cleared.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::models::Money;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn run(storage: &Storage, cmd: BudgetCommands) -> TrackerResult<String> {
        let mut p = Prompt::new(Cursor::new(Vec::new()), Vec::new());
        handle_budget_command(storage, "$", cmd, &mut p)?;
        Ok(String::from_utf8(p.into_output()).unwrap())
    }

    #[test]
    fn test_set_show_clear() {
        let (_temp_dir, storage) = create_test_storage();

        let output = run(&storage, BudgetCommands::Show).unwrap();
        assert!(output.starts_with("No monthly budget set."));

        let output = run(&storage, BudgetCommands::Set { amount: "250".into() }).unwrap();
        assert_eq!(output, "Budget saved: $250.00\n");
        assert_eq!(storage.budget.get().unwrap(), Some(Money::from_cents(25000)));

        let output = run(&storage, BudgetCommands::Show).unwrap();
        assert!(output.contains("Monthly budget: $250.00"));
        assert!(output.contains("Within budget. Remaining: $250.00"));

        let output = run(&storage, BudgetCommands::Clear).unwrap();
        assert_eq!(output, "Budget cleared.\n");
        assert_eq!(storage.budget.get().unwrap(), None);
    }

    #[test]
    fn test_set_rejects_negative() {
        let (_temp_dir, storage) = create_test_storage();

        let err = run(&storage, BudgetCommands::Set { amount: "-10".into() }).unwrap_err();
        assert_eq!(err.to_string(), "Budget cannot be negative.");
        assert!(!storage.budget.path().exists());
    }
}
