use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use expense_tracker::cli::{
    handle_add_command, handle_budget_command, handle_list_command, handle_summary_command,
    install_interrupt_handler, run_menu, AddArgs, BudgetCommands, Prompt,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::error::TrackerResult;
use expense_tracker::storage::{LoadReport, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Beginner-friendly command-line expense tracker",
    long_about = "Track your expenses in a CSV file and compare your spending \
                  against an optional monthly budget. Run without a command to \
                  open the interactive menu."
)]
struct Cli {
    /// Directory holding expenses.csv and budget.txt (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu
    Menu,

    /// Record an expense (prompts for any field not given)
    Add(AddArgs),

    /// List all expenses
    #[command(alias = "ls")]
    List,

    /// Show totals by category and compare against the budget
    Summary,

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show file locations and settings
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Ok(()),
        Err(err) if err.is_validation() => {
            eprintln!("Input error: {}", err);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn run(cli: Cli) -> TrackerResult<()> {
    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    debug!("resolved data directory, path={}", paths.base_dir().display());

    let settings = Settings::load_or_create(&paths)?;
    let symbol = settings.currency_symbol.clone();

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    let command = cli.command.unwrap_or(Commands::Menu);
    if matches!(command, Commands::Menu) {
        prompt.say("Loading saved expenses (if any)...")?;
    }

    let storage = Arc::new(Storage::new(paths)?);
    let report = storage.load_all()?;
    report_skipped(&report);

    match command {
        Commands::Menu => {
            install_interrupt_handler(Arc::clone(&storage))?;
            run_menu(&storage, &settings, &mut prompt)
        }
        Commands::Add(args) => handle_add_command(&storage, &symbol, args, &mut prompt),
        Commands::List => handle_list_command(&storage, &symbol, &mut prompt),
        Commands::Summary => handle_summary_command(&storage, &symbol, &mut prompt),
        Commands::Budget(cmd) => handle_budget_command(&storage, &symbol, cmd, &mut prompt),
        Commands::Config => {
            let paths = storage.paths();
            prompt.say("Expense Tracker Configuration")?;
            prompt.say("=============================")?;
            prompt.say(format!("Data directory: {}", paths.base_dir().display()))?;
            prompt.say(format!("Expenses file:  {}", paths.expenses_file().display()))?;
            prompt.say(format!("Budget file:    {}", paths.budget_file().display()))?;
            prompt.say(format!("Settings file:  {}", paths.settings_file().display()))?;
            prompt.say("")?;
            prompt.say("Settings:")?;
            prompt.say(format!("  Currency symbol:   {}", settings.currency_symbol))?;
            prompt.say(format!("  Confirm additions: {}", settings.confirm_additions))
        }
    }
}

fn report_skipped(report: &LoadReport) {
    for skipped in &report.skipped {
        eprintln!(
            "Skipping row on line {} of the expense file: {}",
            skipped.line, skipped.reason
        );
    }
}
