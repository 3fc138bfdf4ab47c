//! Budget business logic - utilization arithmetic and spend tracking.
//!
//! The pure functions in this module compute remaining amounts, utilization,
//! and limit flags from already-loaded decimals. [`BudgetLedger`] gives a
//! single-writer, in-memory view of a budget and the expenses charged to it;
//! the async functions persist budgets and mutate the running spent sum with
//! atomic database-level updates.

use crate::{
    core::money,
    entities::{Budget, budget, budget::BudgetPeriod, expense},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Fraction of the allocation at which a budget counts as near its limit,
/// used when no explicit threshold is configured.
pub const DEFAULT_ALERT_THRESHOLD: Decimal = dec!(0.80);

/// Exact remaining allocation: `allocated - spent`, no rounding.
///
/// Goes negative once a budget is overspent.
#[must_use]
pub fn remaining_amount(allocated: Decimal, spent: Decimal) -> Decimal {
    allocated - spent
}

/// Whether spending strictly exceeds the allocation.
#[must_use]
pub fn is_over_budget(allocated: Decimal, spent: Decimal) -> bool {
    spent > allocated
}

/// Whether utilization has reached the alert threshold.
///
/// The threshold is a fraction (0.80 means 80%); the comparison is made in
/// percentage space against the scale-4 utilization so an exact threshold
/// hit counts as near the limit.
#[must_use]
pub fn is_near_limit(allocated: Decimal, spent: Decimal, alert_threshold: Decimal) -> bool {
    money::utilization_percent(allocated, spent) >= alert_threshold * Decimal::ONE_HUNDRED
}

/// Whether the budget's covered period has ended as of `today` (strict).
///
/// A budget expires the day *after* its end date; `today == end_date` is
/// still in range.
#[must_use]
pub fn is_expired(budget: &budget::Model, today: NaiveDate) -> bool {
    today > budget.end_date
}

/// Whether the budget is administratively active and not yet expired.
#[must_use]
pub fn is_currently_active(budget: &budget::Model, today: NaiveDate) -> bool {
    budget.is_active && !is_expired(budget, today)
}

/// An owned snapshot of a budget together with the expenses charged to it.
///
/// Callers load a budget, apply charges through the ledger, and persist the
/// resulting spent amount themselves; the ledger itself never touches the
/// database and must not be shared across writers.
#[derive(Debug, Clone)]
pub struct BudgetLedger {
    budget: budget::Model,
    expenses: Vec<expense::Model>,
}

impl BudgetLedger {
    /// Wraps a loaded budget with an empty charge list.
    #[must_use]
    pub const fn new(budget: budget::Model) -> Self {
        Self {
            budget,
            expenses: Vec::new(),
        }
    }

    /// The underlying budget snapshot.
    #[must_use]
    pub const fn budget(&self) -> &budget::Model {
        &self.budget
    }

    /// Expenses currently charged to this ledger.
    #[must_use]
    pub fn expenses(&self) -> &[expense::Model] {
        &self.expenses
    }

    /// Charges an expense: adds its amount to the spent sum and records the
    /// reference. An expense without an amount is ignored entirely.
    pub fn add_expense(&mut self, expense: expense::Model) {
        if let Some(amount) = expense.amount {
            self.budget.spent_amount += amount;
            self.expenses.push(expense);
        }
    }

    /// Reverses a prior charge. Only acts when the expense is currently
    /// associated with the ledger; the spent sum returns to its exact prior
    /// value.
    pub fn remove_expense(&mut self, expense: &expense::Model) {
        if expense.amount.is_none() {
            return;
        }
        if let Some(position) = self.expenses.iter().position(|e| e.id == expense.id) {
            let removed = self.expenses.remove(position);
            if let Some(amount) = removed.amount {
                self.budget.spent_amount -= amount;
            }
        }
    }

    /// Exact remaining allocation for the tracked budget.
    #[must_use]
    pub fn remaining_amount(&self) -> Decimal {
        remaining_amount(self.budget.allocated_amount, self.budget.spent_amount)
    }

    /// Utilization percentage for the tracked budget.
    #[must_use]
    pub fn utilization_percent(&self) -> Decimal {
        money::utilization_percent(self.budget.allocated_amount, self.budget.spent_amount)
    }

    /// Whether the tracked budget is overspent.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        is_over_budget(self.budget.allocated_amount, self.budget.spent_amount)
    }

    /// Whether the tracked budget has reached its alert threshold.
    #[must_use]
    pub fn is_near_limit(&self) -> bool {
        is_near_limit(
            self.budget.allocated_amount,
            self.budget.spent_amount,
            self.budget.alert_threshold,
        )
    }

    /// Consumes the ledger, returning the budget with its updated spent sum.
    #[must_use]
    pub fn into_budget(self) -> budget::Model {
        self.budget
    }
}

/// Creates a new budget with the specified parameters, performing input validation.
///
/// The name must be non-blank, the allocation strictly positive, the date
/// range ordered, and the alert threshold (when given) a fraction in (0, 1].
/// The spent amount starts at zero.
#[allow(clippy::too_many_arguments)]
pub async fn create_budget(
    db: &DatabaseConnection,
    name: String,
    organization_id: String,
    category_id: Option<String>,
    period: BudgetPeriod,
    start_date: NaiveDate,
    end_date: NaiveDate,
    allocated_amount: Decimal,
    alert_threshold: Option<Decimal>,
) -> Result<budget::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Budget name cannot be empty".to_string(),
        });
    }

    if allocated_amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: allocated_amount,
        });
    }

    if end_date < start_date {
        return Err(Error::Config {
            message: format!("Budget end date {end_date} precedes start date {start_date}"),
        });
    }

    let alert_threshold = alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD);
    if alert_threshold <= Decimal::ZERO || alert_threshold > Decimal::ONE {
        return Err(Error::Config {
            message: format!("Alert threshold {alert_threshold} is not a fraction in (0, 1]"),
        });
    }

    let budget = budget::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.trim().to_string()),
        organization_id: Set(organization_id),
        category_id: Set(category_id),
        period: Set(period),
        start_date: Set(start_date),
        end_date: Set(end_date),
        allocated_amount: Set(allocated_amount),
        spent_amount: Set(Decimal::ZERO),
        alert_threshold: Set(alert_threshold),
        is_active: Set(true),
    };

    let result = budget.insert(db).await?;
    Ok(result)
}

/// Finds a budget by its unique ID.
pub async fn get_budget_by_id(
    db: &DatabaseConnection,
    budget_id: &str,
) -> Result<Option<budget::Model>> {
    Budget::find_by_id(budget_id).one(db).await.map_err(Into::into)
}

/// Retrieves all administratively active budgets for an organization,
/// ordered alphabetically by name.
///
/// Date-based expiry is a property of "now" and is left to the caller via
/// [`is_currently_active`].
pub async fn get_active_budgets_for_organization(
    db: &DatabaseConnection,
    organization_id: &str,
) -> Result<Vec<budget::Model>> {
    Budget::find()
        .filter(budget::Column::OrganizationId.eq(organization_id))
        .filter(budget::Column::IsActive.eq(true))
        .order_by_asc(budget::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adjusts a budget's spent sum by atomically adding a delta.
///
/// Uses a single SQL UPDATE (`spent_amount = spent_amount + delta`) so
/// concurrent charges cannot lose updates through read-modify-write races.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `budget_id` - ID of the budget to update
/// * `delta` - Amount to add to the spent sum (negative to release)
///
/// # Returns
/// The updated budget model
pub async fn update_budget_spent_atomic<C>(
    db: &C,
    budget_id: &str,
    delta: Decimal,
) -> Result<budget::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the budget exists
    let _budget = Budget::find_by_id(budget_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::BudgetNotFound {
            id: budget_id.to_string(),
        })?;

    // Perform atomic update: spent_amount = spent_amount + delta
    Budget::update_many()
        .col_expr(
            budget::Column::SpentAmount,
            Expr::col(budget::Column::SpentAmount).add(delta),
        )
        .filter(budget::Column::Id.eq(budget_id))
        .exec(db)
        .await?;

    // Return the updated budget
    Budget::find_by_id(budget_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::BudgetNotFound {
            id: budget_id.to_string(),
        })
}

/// Charges an expense's amount against a budget's persistent spent sum.
///
/// An expense without an amount leaves the budget untouched and returns the
/// current model.
pub async fn charge_expense_to_budget(
    db: &DatabaseConnection,
    budget_id: &str,
    expense: &expense::Model,
) -> Result<budget::Model> {
    match expense.amount {
        Some(amount) => {
            debug!(budget_id, expense_id = %expense.id, %amount, "charging expense to budget");
            update_budget_spent_atomic(db, budget_id, amount).await
        }
        None => get_budget_by_id(db, budget_id)
            .await?
            .ok_or_else(|| Error::BudgetNotFound {
                id: budget_id.to_string(),
            }),
    }
}

/// Reverses a prior charge against a budget's persistent spent sum.
///
/// Exact inverse of [`charge_expense_to_budget`]; callers are responsible
/// for only releasing expenses that were actually charged.
pub async fn release_expense_from_budget(
    db: &DatabaseConnection,
    budget_id: &str,
    expense: &expense::Model,
) -> Result<budget::Model> {
    match expense.amount {
        Some(amount) => {
            debug!(budget_id, expense_id = %expense.id, %amount, "releasing expense from budget");
            update_budget_spent_atomic(db, budget_id, -amount).await
        }
        None => get_budget_by_id(db, budget_id)
            .await?
            .ok_or_else(|| Error::BudgetNotFound {
                id: budget_id.to_string(),
            }),
    }
}
