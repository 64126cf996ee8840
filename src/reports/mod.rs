//! Reports
//!
//! Read-only views over the loaded expenses and budget.

pub mod summary;

pub use summary::SpendingSummary;
