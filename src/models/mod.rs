//! Core data models for the expense tracker

pub mod expense;
pub mod money;

pub use expense::{Expense, DATE_FORMAT};
pub use money::{Money, MoneyParseError};
