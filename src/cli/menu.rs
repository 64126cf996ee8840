//! Interactive menu
//!
//! The numbered menu loop. Expenses added here stay in memory until the user
//! saves or exits. End of input and Ctrl+C both save before quitting.

use std::io::{BufRead, Write};
use std::sync::Arc;

use log::debug;

use crate::config::settings::Settings;
use crate::display::format_expense_table;
use crate::error::{TrackerError, TrackerResult};
use crate::reports::SpendingSummary;
use crate::services::{BudgetService, ExpenseService};
use crate::storage::Storage;

use super::add::{read_expense, AddArgs};
use super::prompt::Prompt;

const MENU: &str = "
========== Personal Expense Tracker ==========
1) Add expense
2) View expenses
3) Set/Track budget
4) Save expenses
5) Exit (auto-save)
==============================================";

/// What the loop should do after a menu action
enum Next {
    Continue,
    Quit,
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    storage: &Storage,
    settings: &Settings,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<()> {
    prompt.say("Welcome! Track your spending and keep an eye on your monthly budget.")?;

    loop {
        prompt.say(MENU)?;

        let Some(choice) = prompt.ask("Choose an option (1-5): ")? else {
            debug!("input ended, saving and exiting");
            save(storage, prompt)?;
            prompt.say("Goodbye!")?;
            return Ok(());
        };

        let result = match choice.as_str() {
            "1" => add_expense(storage, settings, prompt),
            "2" => view_expenses(storage, settings, prompt),
            "3" => track_budget(storage, settings, prompt),
            "4" => save(storage, prompt).map(|_| Next::Continue),
            "5" => save(storage, prompt).map(|_| Next::Quit),
            _ => prompt
                .say("Please choose a valid option (1-5).")
                .map(|_| Next::Continue),
        };

        match result {
            Ok(Next::Continue) => {}
            Ok(Next::Quit) => {
                prompt.say("Goodbye!")?;
                return Ok(());
            }
            Err(err) if err.is_validation() => prompt.say(format!("Input error: {}", err))?,
            Err(err) => prompt.say(format!("An unexpected error occurred: {}", err))?,
        }
    }
}

/// Save and quit when the user presses Ctrl+C
///
/// The handler runs on its own thread while the menu is blocked reading
/// input, so it saves directly and ends the process.
pub fn install_interrupt_handler(storage: Arc<Storage>) -> TrackerResult<()> {
    ctrlc::set_handler(move || {
        let code = match save_on_interrupt(&storage, &mut std::io::stdout()) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("An unexpected error occurred: {}", err);
                1
            }
        };
        std::process::exit(code);
    })
    .map_err(|e| TrackerError::Io(format!("Failed to install Ctrl+C handler: {}", e)))
}

/// Save everything held in memory after an interrupt
pub fn save_on_interrupt<W: Write>(storage: &Storage, out: &mut W) -> TrackerResult<()> {
    debug!("interrupted, saving and exiting");
    writeln!(out, "\nDetected Ctrl+C. Exiting safely...")?;
    storage.save_all()?;
    writeln!(
        out,
        "Saved {} expense(s) to {}.",
        storage.expenses.count()?,
        storage.expenses.path().display()
    )?;
    writeln!(out, "Goodbye!")?;
    out.flush()?;
    Ok(())
}

fn add_expense<R: BufRead, W: Write>(
    storage: &Storage,
    settings: &Settings,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<Next> {
    let raw = read_expense(prompt, AddArgs::default())?;
    let expense = raw.validate()?;

    if settings.confirm_additions {
        let question = format!(
            "Add {} expense of {} on {}? (y/n): ",
            expense.category,
            expense.amount.format_with_symbol(&settings.currency_symbol),
            expense.date_string()
        );
        if !prompt.confirm(&question)? {
            prompt.say("Cancelled adding expense.")?;
            return Ok(Next::Continue);
        }
    }

    ExpenseService::new(storage).add(raw)?;
    prompt.say("Expense added!")?;
    Ok(Next::Continue)
}

fn view_expenses<R: BufRead, W: Write>(
    storage: &Storage,
    settings: &Settings,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<Next> {
    let expenses = ExpenseService::new(storage).list()?;
    if !expenses.is_empty() {
        prompt.say("\nYour Expenses:")?;
    }
    prompt.say(format_expense_table(&expenses, &settings.currency_symbol).trim_end())?;
    Ok(Next::Continue)
}

fn track_budget<R: BufRead, W: Write>(
    storage: &Storage,
    settings: &Settings,
    prompt: &mut Prompt<R, W>,
) -> TrackerResult<Next> {
    let service = BudgetService::new(storage);
    let symbol = &settings.currency_symbol;

    if service.current()?.is_none() {
        prompt.say("No monthly budget set yet.")?;
        if !prompt.confirm("Would you like to set one now? (y/n): ")? {
            prompt.say("Okay, you can set a budget later from the menu.")?;
            return Ok(Next::Continue);
        }

        loop {
            let Some(answer) = prompt.ask("Enter your monthly budget amount: ")? else {
                return Ok(Next::Continue);
            };
            match service.set(&answer) {
                Ok(budget) => {
                    prompt.say(format!("Budget saved: {}", budget.format_with_symbol(symbol)))?;
                    break;
                }
                Err(err) if err.is_validation() => prompt.say(err.to_string())?,
                Err(err) => return Err(err),
            }
        }
    }

    let summary = SpendingSummary::generate(storage)?;
    summary.render_breakdown(prompt.output(), symbol)?;
    Ok(Next::Continue)
}

fn save<R: BufRead, W: Write>(storage: &Storage, prompt: &mut Prompt<R, W>) -> TrackerResult<()> {
    storage.save_all()?;
    prompt.say(format!(
        "Saved {} expense(s) to {}.",
        storage.expenses.count()?,
        storage.expenses.path().display()
    ))
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

    fn run(storage: &Storage, settings: &Settings, input: &str) -> String {
        let mut p = Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run_menu(storage, settings, &mut p).unwrap();
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_add_confirm_and_exit_saves() {
        let (_temp_dir, storage) = create_test_storage();
        let input = "1\n2025-01-15\nfood\n12.50\nLunch\ny\n5\n";

        let output = run(&storage, &Settings::default(), input);

        assert!(output.contains("Add Food expense of $12.50 on 2025-01-15? (y/n): "));
        assert!(output.contains("Expense added!"));
        assert!(output.contains("Saved 1 expense(s) to"));
        assert!(output.trim_end().ends_with("Goodbye!"));

        let reloaded = crate::storage::ExpenseRepository::new(storage.expenses.path().clone());
        assert_eq!(reloaded.load().unwrap().loaded, 1);
    }

    #[test]
    fn test_add_cancelled() {
        let (_temp_dir, storage) = create_test_storage();
        let input = "1\n2025-01-15\nfood\n12.50\nLunch\nn\n5\n";

        let output = run(&storage, &Settings::default(), input);

        assert!(output.contains("Cancelled adding expense."));
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_add_without_confirmation() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings {
            confirm_additions: false,
            ..Settings::default()
        };

        let output = run(&storage, &settings, "1\n2025-01-15\nfood\n3\nTea\n5\n");

        assert!(!output.contains("(y/n)"));
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_input_error_keeps_looping() {
        let (_temp_dir, storage) = create_test_storage();
        let input = "1\n2025-01-15\nfood\n-3\n9\n5\n";

        let output = run(&storage, &Settings::default(), input);

        assert!(output.contains("Input error: Amount cannot be negative."));
        assert!(output.contains("Please choose a valid option (1-5)."));
        assert!(output.contains("Goodbye!"));
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_view_expenses() {
        let (_temp_dir, storage) = create_test_storage();

        let output = run(&storage, &Settings::default(), "2\n5\n");
        assert!(output.contains("No expenses to show yet."));

        let input = "1\n2025-01-15\nfood\n12.50\nLunch\ny\n2\n5\n";
        let output = run(&storage, &Settings::default(), input);
        assert!(output.contains("Your Expenses:"));
        assert!(output.contains("Total shown: 1   |   Total spent: $12.50"));
    }

    #[test]
    fn test_track_budget_sets_after_retry() {
        let (_temp_dir, storage) = create_test_storage();
        let input = "3\ny\nabc\n-5\n200\n5\n";

        let output = run(&storage, &Settings::default(), input);

        assert!(output.contains("No monthly budget set yet."));
        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Budget cannot be negative."));
        assert!(output.contains("Budget saved: $200.00"));
        assert!(output.contains("Within budget. Remaining: $200.00"));
        assert!(output.contains("No spending yet to break down by category."));
        assert_eq!(storage.budget.get().unwrap(), Some(Money::from_cents(20000)));
    }

    #[test]
    fn test_track_budget_declined() {
        let (_temp_dir, storage) = create_test_storage();

        let output = run(&storage, &Settings::default(), "3\nn\n5\n");

        assert!(output.contains("Okay, you can set a budget later from the menu."));
        assert_eq!(storage.budget.get().unwrap(), None);
    }

    #[test]
    fn test_track_budget_exceeded() {
        let (_temp_dir, storage) = create_test_storage();
        storage.budget.set(Money::from_cents(1000)).unwrap();
        let input = "1\n2025-01-15\nfood\n12.50\nLunch\ny\n3\n5\n";

        let output = run(&storage, &Settings::default(), input);

        assert!(output.contains("You have exceeded your budget by $2.50!"));
        assert!(output.contains("  - Food: $12.50"));
    }

    #[test]
    fn test_end_of_input_saves() {
        let (_temp_dir, storage) = create_test_storage();
        let input = "1\n2025-01-15\nfood\n12.50\nLunch\ny\n";

        let output = run(&storage, &Settings::default(), input);

        assert!(output.contains("Saved 1 expense(s) to"));
        assert!(output.trim_end().ends_with("Goodbye!"));
        assert!(storage.expenses.path().exists());
    }

    #[test]
    fn test_save_then_view_in_one_session() {
        let (_temp_dir, storage) = create_test_storage();
        let input = "1\n2025-01-15\nfood\n12.50\nLunch\ny\n4\n2\n5\n";

        let output = run(&storage, &Settings::default(), input);

        let saved = output.find("Saved 1 expense(s) to").unwrap();
        let viewed = output.find("Your Expenses:").unwrap();
        assert!(saved < viewed);
        assert_eq!(output.matches("Saved 1 expense(s) to").count(), 2);
        assert!(output.contains("Total shown: 1   |   Total spent: $12.50"));
        assert!(output.trim_end().ends_with("Goodbye!"));
        assert_eq!(
            std::fs::read_to_string(storage.expenses.path()).unwrap(),
            "date,category,amount,description\n2025-01-15,Food,12.50,Lunch\n"
        );
    }

    #[test]
    fn test_exit_rewrite_drops_skipped_rows() {
        let (_temp_dir, storage) = create_test_storage();
        std::fs::write(
            storage.expenses.path(),
            "date,category,amount,description\n\
             2025-01-02,Travel,40.00,Train\n\
             not-a-date,Food,1.00,Broken\n\
             2025-01-01,Food,12.50,Lunch\n",
        )
        .unwrap();
        let report = storage.load_all().unwrap();
        assert_eq!(report.skipped.len(), 1);

        run(&storage, &Settings::default(), "5\n");

        let contents = std::fs::read_to_string(storage.expenses.path()).unwrap();
        assert_eq!(
            contents,
            "date,category,amount,description\n\
             2025-01-02,Travel,40.00,Train\n\
             2025-01-01,Food,12.50,Lunch\n"
        );
    }

    #[test]
    fn test_interrupt_saves_unsaved_additions() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings {
            confirm_additions: false,
            ..Settings::default()
        };
        let mut p = Prompt::new(
            Cursor::new(b"2025-01-15\nfood\n3\nTea\n".to_vec()),
            Vec::new(),
        );
        add_expense(&storage, &settings, &mut p).unwrap();
        assert!(!storage.expenses.path().exists());

        let mut out = Vec::new();
        save_on_interrupt(&storage, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Detected Ctrl+C. Exiting safely..."));
        assert!(output.contains("Saved 1 expense(s) to"));
        assert!(output.trim_end().ends_with("Goodbye!"));

        let reloaded = crate::storage::ExpenseRepository::new(storage.expenses.path().clone());
        assert_eq!(reloaded.load().unwrap().loaded, 1);
    }

    #[test]
    fn test_end_of_input_mid_add() {
        let (_temp_dir, storage) = create_test_storage();

        let output = run(&storage, &Settings::default(), "1\n2025-01-15\n");

        assert!(output.contains("Input error: No input received."));
        assert!(output.trim_end().ends_with("Goodbye!"));
    }
}
