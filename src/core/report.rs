//! Report generation business logic - read-side aggregation over expenses.
//!
//! Every function here is a pure reducer over an already-loaded expense
//! scope (an organization's expenses, optionally narrowed to one user).
//! Callers pass `today` explicitly so month arithmetic is deterministic and
//! testable; nothing in this module touches the database or the clock.

use crate::entities::{expense, expense::ExpenseStatus};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::core::money;

/// Name used for expenses that have no category or whose category is unknown.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Headline numbers for an expense scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    /// Total number of expenses in the scope
    pub total_count: usize,
    /// Expenses still in Draft
    pub draft_count: usize,
    /// Expenses awaiting an approval decision
    pub pending_count: usize,
    /// Approved expenses
    pub approved_count: usize,
    /// Rejected expenses
    pub rejected_count: usize,
    /// Reimbursed expenses
    pub reimbursed_count: usize,
    /// Sum of amounts over the whole scope; exact zero for an empty scope
    pub total_amount: Decimal,
    /// Sum of amounts dated in the calendar month of `today`
    pub current_month_amount: Decimal,
    /// Sum of amounts dated in the calendar month before `today`'s
    pub last_month_amount: Decimal,
    /// Percentage change from last month to this month; zero when last
    /// month had no spend
    pub month_over_month_change: Decimal,
    /// Approved share of all expenses as a percentage; zero for an empty scope
    pub approval_rate: Decimal,
}

/// One category's share of the scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Category display name, or [`UNCATEGORIZED`]
    pub name: String,
    /// Sum of amounts in this category
    pub total: Decimal,
}

/// One month's share of the scope.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// Month label in `YYYY-MM` form
    pub month: String,
    /// Sum of amounts dated in this month
    pub total: Decimal,
}

/// Counts the expenses in the scope with the given status.
#[must_use]
pub fn count_by_status(expenses: &[expense::Model], status: ExpenseStatus) -> usize {
    expenses.iter().filter(|e| e.status == status).count()
}

/// Sums expense amounts over the scope.
///
/// An empty scope sums to exact zero; expenses without an amount contribute
/// nothing.
#[must_use]
pub fn total_amount(expenses: &[expense::Model]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc + e.amount.unwrap_or_default())
}

/// Computes the headline summary for a scope, anchored at `today`.
#[must_use]
pub fn summarize_expenses(expenses: &[expense::Model], today: NaiveDate) -> ExpenseSummary {
    let total_count = expenses.len();
    let approved_count = count_by_status(expenses, ExpenseStatus::Approved);

    let current = (today.year(), today.month());
    let previous = months_back(today.year(), today.month(), 1);

    let current_month_amount = month_amount(expenses, current);
    let last_month_amount = month_amount(expenses, previous);

    let approval_rate = if total_count == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(approved_count) / Decimal::from(total_count) * Decimal::ONE_HUNDRED
    };

    ExpenseSummary {
        total_count,
        draft_count: count_by_status(expenses, ExpenseStatus::Draft),
        pending_count: count_by_status(expenses, ExpenseStatus::Pending),
        approved_count,
        rejected_count: count_by_status(expenses, ExpenseStatus::Rejected),
        reimbursed_count: count_by_status(expenses, ExpenseStatus::Reimbursed),
        total_amount: total_amount(expenses),
        current_month_amount,
        last_month_amount,
        month_over_month_change: money::percent_change(current_month_amount, last_month_amount),
        approval_rate,
    }
}

/// Groups the scope's amounts by category display name, descending by total.
///
/// `category_names` maps category ids to display names; expenses without a
/// category, or whose category id is not in the map, land in the
/// [`UNCATEGORIZED`] bucket. Ties break on name so the ordering is stable.
#[must_use]
pub fn by_category(
    expenses: &[expense::Model],
    category_names: &HashMap<String, String>,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for expense in expenses {
        let name = expense
            .category_id
            .as_ref()
            .and_then(|id| category_names.get(id))
            .map_or(UNCATEGORIZED, String::as_str);
        *totals.entry(name).or_insert(Decimal::ZERO) += expense.amount.unwrap_or_default();
    }

    let mut result: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(name, total)| CategoryTotal {
            name: name.to_string(),
            total,
        })
        .collect();
    result.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    result
}

/// Groups the scope's amounts by `YYYY-MM` label for the trailing `months`
/// calendar months ending at `today`'s month, ascending chronologically.
///
/// Months inside the window with no expenses are absent from the result, not
/// zero-filled.
#[must_use]
pub fn by_month(expenses: &[expense::Model], months: u32, today: NaiveDate) -> Vec<MonthTotal> {
    let window: Vec<(i32, u32)> = (0..months)
        .rev()
        .map(|back| months_back(today.year(), today.month(), back))
        .collect();

    let mut totals: HashMap<(i32, u32), Decimal> = HashMap::new();
    for expense in expenses {
        let key = (expense.expense_date.year(), expense.expense_date.month());
        if window.contains(&key) {
            *totals.entry(key).or_insert(Decimal::ZERO) += expense.amount.unwrap_or_default();
        }
    }

    window
        .into_iter()
        .filter_map(|key| {
            totals.get(&key).map(|total| MonthTotal {
                month: month_label(key),
                total: *total,
            })
        })
        .collect()
}

/// Formats a (year, month) pair as `YYYY-MM`.
#[must_use]
pub fn month_label((year, month): (i32, u32)) -> String {
    format!("{year:04}-{month:02}")
}

fn month_amount(expenses: &[expense::Model], (year, month): (i32, u32)) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.expense_date.year() == year && e.expense_date.month() == month)
        .fold(Decimal::ZERO, |acc, e| acc + e.amount.unwrap_or_default())
}

/// Steps `back` calendar months before (year, month), rolling over year
/// boundaries: one month back from January is December of the prior year.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month) - 1 - i64::from(back);
    // Cast safety: calendar years stay well inside i32/u32 range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let year = total.div_euclid(12) as i32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let month = (total.rem_euclid(12) + 1) as u32;
    (year, month)
}
