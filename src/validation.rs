//! Input validation
//!
//! Turns raw user or file input into well-formed values. Every failure is a
//! [`TrackerError::Validation`] whose message can be shown to the user as-is.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, Money, MoneyParseError, DATE_FORMAT};

/// Largest accepted expense or budget amount
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// Unvalidated expense fields, as typed by the user or read from a CSV row
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct RawExpense {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl RawExpense {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
            description: description.into(),
        }
    }

    /// Validate every field in order, failing on the first bad one
    pub fn validate(&self) -> TrackerResult<Expense> {
        let date = parse_date(&self.date)?;
        let category = normalize_category(&self.category)?;
        let amount = parse_amount(&self.amount)?;
        let description = validate_description(&self.description)?;

        Ok(Expense::new(date, category, amount, description))
    }
}

impl TryFrom<RawExpense> for Expense {
    type Error = TrackerError;

    fn try_from(raw: RawExpense) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| TrackerError::validation("Invalid date format. Please use YYYY-MM-DD."))
}

/// Trim and title-case a category label
pub fn normalize_category(input: &str) -> TrackerResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("Category cannot be empty."));
    }
    Ok(title_case(trimmed))
}

/// Parse a non-negative expense amount
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    parse_non_negative(
        input,
        "Amount must be a valid number.",
        "Amount cannot be negative.",
        "Amount",
    )
}

/// Parse a non-negative budget amount
pub fn parse_budget(input: &str) -> TrackerResult<Money> {
    parse_non_negative(
        input,
        "Please enter a valid number.",
        "Budget cannot be negative.",
        "Budget",
    )
}

/// Trim a description, rejecting empty ones
pub fn validate_description(input: &str) -> TrackerResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("Description cannot be empty."));
    }
    Ok(trimmed.to_string())
}

fn parse_non_negative(
    input: &str,
    malformed: &str,
    negative: &str,
    label: &str,
) -> TrackerResult<Money> {
    let amount = Money::parse(input).map_err(|e| match e {
        MoneyParseError::TooPrecise(_) => {
            TrackerError::validation(format!("{} Use at most two decimal places.", malformed))
        }
        _ => TrackerError::validation(malformed),
    })?;

    if amount.is_negative() {
        return Err(TrackerError::validation(negative));
    }
    if amount > MAX_AMOUNT {
        return Err(TrackerError::validation(format!(
            "{} cannot be more than {}.",
            label, MAX_AMOUNT
        )));
    }
    Ok(amount)
}

/// Capitalize the first letter of every word and lowercase the rest
///
/// A word is any run of alphabetic characters, so "road-trip" becomes
/// "Road-Trip".
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_word = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(c);
            in_word = false;
        }
    }

    output
}
