//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod add;
pub mod budget;
pub mod menu;
pub mod prompt;
pub mod report;

pub use add::{handle_add_command, AddArgs};
pub use budget::{handle_budget_command, BudgetCommands};
pub use menu::{install_interrupt_handler, run_menu};
pub use prompt::Prompt;
pub use report::{handle_list_command, handle_summary_command};
