//! Budget service
//!
//! Sets, clears and compares the single monthly budget against spending.

use log::info;

use crate::error::TrackerResult;
use crate::models::Money;
use crate::storage::Storage;
use crate::validation::parse_budget;

use super::expense::ExpenseService;

/// Spending compared against the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetStatus {
    pub budget: Money,
    pub spent: Money,
    /// Budget minus spending; negative once the budget is exceeded
    pub remaining: Money,
}

impl BudgetStatus {
    pub fn new(budget: Money, spent: Money) -> Self {
        Self {
            budget,
            spent,
            remaining: budget - spent,
        }
    }

    /// Spending strictly above the budget. Hitting it exactly is still within.
    pub fn is_exceeded(&self) -> bool {
        self.spent > self.budget
    }

    /// How far spending went past the budget
    pub fn overspent_by(&self) -> Money {
        if self.is_exceeded() {
            self.remaining.abs()
        } else {
            Money::zero()
        }
    }
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new budget, replacing any previous one
    pub fn set(&self, input: &str) -> TrackerResult<Money> {
        let budget = parse_budget(input)?;
        self.storage.budget.set(budget)?;

        info!("budget set, budget={}", budget);
        Ok(budget)
    }

    /// Remove the budget
    pub fn clear(&self) -> TrackerResult<()> {
        self.storage.budget.clear()?;
        info!("budget cleared");
        Ok(())
    }

    /// The current budget, if any
    pub fn current(&self) -> TrackerResult<Option<Money>> {
        self.storage.budget.get()
    }

    /// Compare spending against the budget, if one is set
    pub fn status(&self) -> TrackerResult<Option<BudgetStatus>> {
        let Some(budget) = self.current()? else {
            return Ok(None);
        };

        let spent = ExpenseService::new(self.storage).total_spent()?;
        Ok(Some(BudgetStatus::new(budget, spent)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::validation::RawExpense;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_status_without_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert_eq!(service.status().unwrap(), None);
    }

    #[test]
    fn test_set_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert_eq!(
            service.set("-5").unwrap_err().to_string(),
            "Budget cannot be negative."
        );
        assert_eq!(
            service.set("five").unwrap_err().to_string(),
            "Please enter a valid number."
        );
        assert_eq!(service.current().unwrap(), None);

        assert_eq!(service.set(" 300 ").unwrap(), Money::from_cents(30000));
        assert_eq!(service.current().unwrap(), Some(Money::from_cents(30000)));
    }

    #[test]
    fn test_status_within_and_exceeded() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let expenses = ExpenseService::new(&storage);

        service.set("100").unwrap();
        expenses
            .add(RawExpense::new("2025-01-01", "Food", "60", "Groceries"))
            .unwrap();

        let status = service.status().unwrap().unwrap();
        assert!(!status.is_exceeded());
        assert_eq!(status.remaining, Money::from_cents(4000));

        expenses
            .add(RawExpense::new("2025-01-02", "Food", "40", "Dinner"))
            .unwrap();
        let status = service.status().unwrap().unwrap();
        assert!(!status.is_exceeded());
        assert_eq!(status.remaining, Money::zero());

        expenses
            .add(RawExpense::new("2025-01-03", "Fun", "15.25", "Cinema"))
            .unwrap();
        let status = service.status().unwrap().unwrap();
        assert!(status.is_exceeded());
        assert_eq!(status.overspent_by(), Money::from_cents(1525));
    }

    #[test]
    fn test_status_with_largest_amounts() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let expenses = ExpenseService::new(&storage);

        service.set("100").unwrap();
        for day in ["2025-01-01", "2025-01-02"] {
            expenses
                .add(RawExpense::new(day, "Rent", "1000000000", "Castle"))
                .unwrap();
        }

        let status = service.status().unwrap().unwrap();
        assert!(status.is_exceeded());
        assert_eq!(status.spent, Money::from_cents(200_000_000_000));
        assert_eq!(status.overspent_by(), Money::from_cents(199_999_990_000));
    }

    #[test]
    fn test_clear() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.set("100").unwrap();
        service.clear().unwrap();

        assert_eq!(service.current().unwrap(), None);
        assert!(!storage.budget.path().exists());
    }
}
