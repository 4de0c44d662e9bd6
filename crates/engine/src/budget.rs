//! Budget views: estimated cost, actual spend, and their variance.
//!
//! Estimation is a pure function of the current stops/activities plus a
//! catalog lookup; the ledger summary is a pure fold over the current
//! expense rows. Nothing here is cached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Money,
    expense::{Expense, ExpenseCategory},
};

/// Projected spend derived from catalog data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Sum of planned activity costs (missing costs count as 0).
    pub activity_cost: Money,
    /// Sum over stops of day span × city cost index.
    pub living_cost: Money,
    pub total: Money,
}

impl CostEstimate {
    pub fn new(activity_cost: Money, living_cost: Money) -> Self {
        Self {
            activity_cost,
            living_cost,
            total: activity_cost + living_cost,
        }
    }
}

/// Aggregated actual spend.
///
/// Categories with no expense are omitted from `by_category` rather than
/// zero-filled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub by_category: BTreeMap<ExpenseCategory, Money>,
    pub total: Money,
    /// `total / trip day span`; 0 when the span is 0.
    pub avg_per_day: Money,
}

impl ExpenseSummary {
    /// Folds the current expense rows into per-category totals.
    pub fn from_expenses(expenses: &[Expense], trip_days: i64) -> Self {
        let mut by_category: BTreeMap<ExpenseCategory, Money> = BTreeMap::new();
        let mut total = Money::ZERO;
        for expense in expenses {
            *by_category.entry(expense.category).or_insert(Money::ZERO) += expense.amount;
            total += expense.amount;
        }
        let avg_per_day = if trip_days > 0 {
            Money::new(total.minor() / trip_days)
        } else {
            Money::ZERO
        };
        Self {
            by_category,
            total,
            avg_per_day,
        }
    }
}

/// Estimate and ledger side by side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetView {
    pub estimated: CostEstimate,
    pub actual: ExpenseSummary,
    /// `actual.total - estimated.total`; negative while under budget.
    pub variance: Money,
}

impl BudgetView {
    pub fn new(estimated: CostEstimate, actual: ExpenseSummary) -> Self {
        let variance = actual.total - estimated.total;
        Self {
            estimated,
            actual,
            variance,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::Currency;

    fn expense(category: ExpenseCategory, minor: i64) -> Expense {
        Expense::new(
            Uuid::new_v4(),
            category,
            Money::new(minor),
            Currency::default(),
            None,
            NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn summary_omits_absent_categories() {
        let rows = vec![
            expense(ExpenseCategory::Meals, 1050),
            expense(ExpenseCategory::Meals, 950),
            expense(ExpenseCategory::Transport, 2000),
        ];
        let summary = ExpenseSummary::from_expenses(&rows, 4);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(
            summary.by_category[&ExpenseCategory::Meals],
            Money::new(2000)
        );
        assert_eq!(summary.total, Money::new(4000));
        assert_eq!(summary.avg_per_day, Money::new(1000));
    }

    #[test]
    fn empty_ledger_summarizes_to_zero() {
        let summary = ExpenseSummary::from_expenses(&[], 0);
        assert!(summary.by_category.is_empty());
        assert_eq!(summary.total, Money::ZERO);
        assert_eq!(summary.avg_per_day, Money::ZERO);
    }

    #[test]
    fn variance_is_actual_minus_estimated() {
        let estimate = CostEstimate::new(Money::new(2000), Money::new(15_000));
        let actual = ExpenseSummary::from_expenses(&[expense(ExpenseCategory::Other, 18_000)], 3);
        let budget = BudgetView::new(estimate, actual);
        assert_eq!(budget.variance, Money::new(1000));
    }
}
