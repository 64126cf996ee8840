//! Expense Tracker - a beginner-friendly command-line expense tracker
//!
//! Expenses are kept in a CSV file and an optional monthly budget in a
//! one-line text file, both in the data directory.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense and money types
//! - `validation`: Input checks with friendly messages
//! - `storage`: CSV and text file persistence
//! - `services`: Business logic layer
//! - `reports`: Spending summaries
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::TrackerPaths;
//! use expense_tracker::storage::Storage;
//!
//! let storage = Storage::new(TrackerPaths::new()?)?;
//! storage.load_all()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{TrackerError, TrackerResult};
