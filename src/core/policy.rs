//! Policy business logic - compliance evaluation for individual expenses.
//!
//! A policy is evaluated per call against one expense; it keeps no state
//! between evaluations. The compliance predicate deliberately treats
//! "requires manual approval" as non-compliant: a true result means the
//! expense clears the policy with no human intervention needed.

use crate::{
    entities::{Policy, expense, policy},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Evaluates one expense against one policy.
///
/// Checks run in a fixed order:
/// 1. an inactive policy never restricts anything;
/// 2. an amount strictly above `max_amount` fails (exactly equal passes);
/// 3. a required receipt must be present and non-blank;
/// 4. an amount at or above `approval_threshold` fails when approval is
///    required, signalling that manual approval is mandatory.
///
/// An expense without an amount skips the amount-based checks.
#[must_use]
pub fn is_expense_compliant(policy: &policy::Model, expense: &expense::Model) -> bool {
    if !policy.is_active {
        return true; // Inactive policies don't restrict
    }

    if let (Some(max_amount), Some(amount)) = (policy.max_amount, expense.amount) {
        if amount > max_amount {
            return false;
        }
    }

    if policy.requires_receipt && !has_receipt(expense) {
        return false;
    }

    if policy.requires_approval {
        if let (Some(threshold), Some(amount)) = (policy.approval_threshold, expense.amount) {
            if amount >= threshold {
                return false; // Requires approval but expense is over threshold
            }
        }
    }

    true
}

/// Whether an expense of `amount` would need manual approval under this policy.
#[must_use]
pub fn requires_approval_for_amount(policy: &policy::Model, amount: Decimal) -> bool {
    policy.requires_approval
        && policy
            .approval_threshold
            .is_some_and(|threshold| amount >= threshold)
}

/// Whether an expense of `amount` would need a receipt under this policy.
///
/// With no configured cap every amount needs a receipt; with a cap, amounts
/// at or above it do.
#[must_use]
pub fn requires_receipt_for_amount(policy: &policy::Model, amount: Decimal) -> bool {
    policy.requires_receipt
        && policy
            .max_amount
            .is_none_or(|max_amount| amount >= max_amount)
}

/// Filters a loaded policy set down to the policies the expense violates.
///
/// The result preserves the input order; an empty result means the expense
/// is compliant with every supplied policy.
#[must_use]
pub fn non_compliant_policies<'a>(
    policies: &'a [policy::Model],
    expense: &expense::Model,
) -> Vec<&'a policy::Model> {
    policies
        .iter()
        .filter(|policy| !is_expense_compliant(policy, expense))
        .collect()
}

fn has_receipt(expense: &expense::Model) -> bool {
    expense
        .receipt_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty())
}

/// Creates a new policy with the specified parameters, performing input validation.
///
/// Receipt and approval requirements default to on; amounts, when given,
/// must be positive.
#[allow(clippy::too_many_arguments)]
pub async fn create_policy(
    db: &DatabaseConnection,
    name: String,
    organization_id: String,
    category_id: Option<String>,
    max_amount: Option<Decimal>,
    requires_receipt: bool,
    requires_approval: bool,
    approval_threshold: Option<Decimal>,
) -> Result<policy::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Policy name cannot be empty".to_string(),
        });
    }

    for amount in [max_amount, approval_threshold].into_iter().flatten() {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }
    }

    let policy = policy::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.trim().to_string()),
        organization_id: Set(organization_id),
        category_id: Set(category_id),
        max_amount: Set(max_amount),
        requires_receipt: Set(requires_receipt),
        requires_approval: Set(requires_approval),
        approval_threshold: Set(approval_threshold),
        is_active: Set(true),
    };

    let result = policy.insert(db).await?;
    Ok(result)
}

/// Finds a policy by its unique ID.
pub async fn get_policy_by_id(
    db: &DatabaseConnection,
    policy_id: &str,
) -> Result<Option<policy::Model>> {
    Policy::find_by_id(policy_id).one(db).await.map_err(Into::into)
}

/// Retrieves all active policies for an organization, ordered alphabetically
/// by name.
pub async fn get_active_policies_for_organization(
    db: &DatabaseConnection,
    organization_id: &str,
) -> Result<Vec<policy::Model>> {
    Policy::find()
        .filter(policy::Column::OrganizationId.eq(organization_id))
        .filter(policy::Column::IsActive.eq(true))
        .order_by_asc(policy::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
