//! Service layer
//!
//! Business logic sitting between the CLI and storage.

pub mod budget;
pub mod expense;

pub use budget::{BudgetService, BudgetStatus};
pub use expense::{CategoryTotal, ExpenseService};
