//! Expense business logic - creation, lifecycle transitions, and scope loads.
//!
//! Expenses move Draft -> Pending -> Approved | Rejected -> Reimbursed.
//! Approval decisions are gated on the acting user's role. Loaders return
//! the "scope" the aggregation reducers in [`crate::core::report`] consume:
//! all expenses of an organization, optionally narrowed to one user.

use crate::{
    entities::{Expense, expense, expense::ExpenseStatus, user, user::UserRole},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`create_expense`]. Everything a submitter fills in before the
/// engine assigns an id, status, and creation timestamp.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    /// Short human-readable title
    pub title: String,
    /// Amount before tax; None while the draft is incomplete
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code
    pub currency: String,
    /// Calendar date the expense was incurred
    pub expense_date: NaiveDate,
    /// Submitting user
    pub user_id: String,
    /// Owning organization
    pub organization_id: String,
    /// Optional reporting category
    pub category_id: Option<String>,
    /// Optional store or vendor
    pub store_id: Option<String>,
    /// Optional receipt reference
    pub receipt_url: Option<String>,
    /// Tax portion, zero when untaxed
    pub tax_amount: Decimal,
    /// Tax rate as a fraction
    pub tax_rate: Option<Decimal>,
}

/// Whether `from -> to` is a legal lifecycle move.
///
/// Draft expenses are submitted to Pending; an approver resolves Pending to
/// Approved or Rejected; Approved expenses may be Reimbursed. Everything
/// else is rejected.
#[must_use]
pub const fn can_transition(from: ExpenseStatus, to: ExpenseStatus) -> bool {
    matches!(
        (from, to),
        (ExpenseStatus::Draft, ExpenseStatus::Pending)
            | (ExpenseStatus::Pending, ExpenseStatus::Approved)
            | (ExpenseStatus::Pending, ExpenseStatus::Rejected)
            | (ExpenseStatus::Approved, ExpenseStatus::Reimbursed)
    )
}

/// Whether a user role may approve or reject submitted expenses.
#[must_use]
pub const fn can_approve(role: UserRole) -> bool {
    matches!(role, UserRole::Manager | UserRole::Admin)
}

/// The full cost of an expense: amount plus tax.
///
/// A draft without an amount contributes only its tax portion.
#[must_use]
pub fn total_amount(expense: &expense::Model) -> Decimal {
    expense.amount.unwrap_or_default() + expense.tax_amount
}

/// Creates a new expense in Draft status, performing input validation.
///
/// The title must be non-blank; amount and tax, when present, must be
/// non-negative. Parsing raw user input into decimals and dates is the
/// caller's job; this function assumes well-typed values.
pub async fn create_expense(
    db: &DatabaseConnection,
    draft: ExpenseDraft,
) -> Result<expense::Model> {
    if draft.title.trim().is_empty() {
        return Err(Error::Config {
            message: "Expense title cannot be empty".to_string(),
        });
    }

    if let Some(amount) = draft.amount {
        if amount < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }
    }

    if draft.tax_amount < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: draft.tax_amount,
        });
    }

    let expense = expense::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        title: Set(draft.title.trim().to_string()),
        amount: Set(draft.amount),
        currency: Set(draft.currency),
        expense_date: Set(draft.expense_date),
        status: Set(ExpenseStatus::Draft),
        user_id: Set(draft.user_id),
        organization_id: Set(draft.organization_id),
        category_id: Set(draft.category_id),
        store_id: Set(draft.store_id),
        receipt_url: Set(draft.receipt_url),
        tax_amount: Set(draft.tax_amount),
        tax_rate: Set(draft.tax_rate),
        created_at: Set(chrono::Utc::now()),
    };

    let result = expense.insert(db).await?;
    Ok(result)
}

/// Finds an expense by its unique ID.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: &str,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all expenses for an organization, ordered by expense date.
///
/// This is the organization-wide aggregation scope.
pub async fn get_expenses_for_organization(
    db: &DatabaseConnection,
    organization_id: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::OrganizationId.eq(organization_id))
        .order_by_asc(expense::Column::ExpenseDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves one user's expenses within an organization, ordered by expense
/// date.
///
/// This is the per-user aggregation scope.
pub async fn get_expenses_for_user(
    db: &DatabaseConnection,
    organization_id: &str,
    user_id: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::OrganizationId.eq(organization_id))
        .filter(expense::Column::UserId.eq(user_id))
        .order_by_asc(expense::Column::ExpenseDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Submits a draft expense for approval (Draft -> Pending).
pub async fn submit_expense(db: &DatabaseConnection, expense_id: &str) -> Result<expense::Model> {
    set_status(db, expense_id, ExpenseStatus::Pending).await
}

/// Approves a pending expense (Pending -> Approved).
///
/// Only managers and admins may approve.
pub async fn approve_expense(
    db: &DatabaseConnection,
    expense_id: &str,
    approver: &user::Model,
) -> Result<expense::Model> {
    if !can_approve(approver.role) {
        return Err(Error::NotAuthorized {
            role: approver.role,
        });
    }
    let approved = set_status(db, expense_id, ExpenseStatus::Approved).await?;
    info!(expense_id, approver = %approver.id, "expense approved");
    Ok(approved)
}

/// Rejects a pending expense (Pending -> Rejected).
///
/// Only managers and admins may reject.
pub async fn reject_expense(
    db: &DatabaseConnection,
    expense_id: &str,
    approver: &user::Model,
) -> Result<expense::Model> {
    if !can_approve(approver.role) {
        return Err(Error::NotAuthorized {
            role: approver.role,
        });
    }
    let rejected = set_status(db, expense_id, ExpenseStatus::Rejected).await?;
    info!(expense_id, approver = %approver.id, "expense rejected");
    Ok(rejected)
}

/// Marks an approved expense as paid out (Approved -> Reimbursed).
pub async fn reimburse_expense(
    db: &DatabaseConnection,
    expense_id: &str,
) -> Result<expense::Model> {
    set_status(db, expense_id, ExpenseStatus::Reimbursed).await
}

async fn set_status(
    db: &DatabaseConnection,
    expense_id: &str,
    to: ExpenseStatus,
) -> Result<expense::Model> {
    let expense = get_expense_by_id(db, expense_id)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound {
            id: expense_id.to_string(),
        })?;

    if !can_transition(expense.status, to) {
        return Err(Error::InvalidStatusTransition {
            from: expense.status,
            to,
        });
    }

    let mut active_model: expense::ActiveModel = expense.into();
    active_model.status = Set(to);
    active_model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_can_transition_matrix() {
        use ExpenseStatus::{Approved, Draft, Pending, Reimbursed, Rejected};

        assert!(can_transition(Draft, Pending));
        assert!(can_transition(Pending, Approved));
        assert!(can_transition(Pending, Rejected));
        assert!(can_transition(Approved, Reimbursed));

        assert!(!can_transition(Draft, Approved));
        assert!(!can_transition(Rejected, Approved));
        assert!(!can_transition(Reimbursed, Pending));
        assert!(!can_transition(Pending, Pending));
        assert!(!can_transition(Rejected, Reimbursed));
    }

    #[test]
    fn test_can_approve_roles() {
        assert!(can_approve(UserRole::Manager));
        assert!(can_approve(UserRole::Admin));
        assert!(!can_approve(UserRole::Employee));
        assert!(!can_approve(UserRole::Accountant));
    }

    #[test]
    fn test_total_amount_includes_tax() {
        let mut expense = expense_fixture("e-1", Some(dec!(100.00)));
        expense.tax_amount = dec!(8.25);
        assert_eq!(total_amount(&expense), dec!(108.25));

        expense.amount = None;
        assert_eq!(total_amount(&expense), dec!(8.25));
    }

    #[tokio::test]
    async fn test_create_expense_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let user = create_test_user(&db, &org.id, UserRole::Employee).await?;

        let mut draft = test_expense_draft(&org.id, &user.id, dec!(10));
        draft.title = "  ".to_string();
        let result = create_expense(&db, draft).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let mut draft = test_expense_draft(&org.id, &user.id, dec!(10));
        draft.amount = Some(dec!(-1));
        let result = create_expense(&db, draft).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        let mut draft = test_expense_draft(&org.id, &user.id, dec!(10));
        draft.tax_amount = dec!(-0.01);
        let result = create_expense(&db, draft).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let user = create_test_user(&db, &org.id, UserRole::Employee).await?;

        let expense = create_test_expense(&db, &org.id, &user.id, dec!(42.50)).await?;

        assert_eq!(expense.status, ExpenseStatus::Draft);
        assert_eq!(expense.amount, Some(dec!(42.50)));
        assert_eq!(expense.organization_id, org.id);
        assert_eq!(expense.user_id, user.id);

        let found = get_expense_by_id(&db, &expense.id).await?;
        assert_eq!(found.unwrap().id, expense.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_full_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let employee = create_test_user(&db, &org.id, UserRole::Employee).await?;
        let manager = create_test_user(&db, &org.id, UserRole::Manager).await?;

        let expense = create_test_expense(&db, &org.id, &employee.id, dec!(75)).await?;

        let pending = submit_expense(&db, &expense.id).await?;
        assert_eq!(pending.status, ExpenseStatus::Pending);

        let approved = approve_expense(&db, &expense.id, &manager).await?;
        assert_eq!(approved.status, ExpenseStatus::Approved);

        let reimbursed = reimburse_expense(&db, &expense.id).await?;
        assert_eq!(reimbursed.status, ExpenseStatus::Reimbursed);

        Ok(())
    }

    #[tokio::test]
    async fn test_reject_path() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let employee = create_test_user(&db, &org.id, UserRole::Employee).await?;
        let admin = create_test_user(&db, &org.id, UserRole::Admin).await?;

        let expense = create_test_expense(&db, &org.id, &employee.id, dec!(75)).await?;
        submit_expense(&db, &expense.id).await?;

        let rejected = reject_expense(&db, &expense.id, &admin).await?;
        assert_eq!(rejected.status, ExpenseStatus::Rejected);

        // A rejected expense cannot be reimbursed
        let result = reimburse_expense(&db, &expense.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidStatusTransition { from: _, to: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_approval_requires_approver_role() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let employee = create_test_user(&db, &org.id, UserRole::Employee).await?;
        let accountant = create_test_user(&db, &org.id, UserRole::Accountant).await?;

        let expense = create_test_expense(&db, &org.id, &employee.id, dec!(75)).await?;
        submit_expense(&db, &expense.id).await?;

        let result = approve_expense(&db, &expense.id, &accountant).await;
        assert!(matches!(result.unwrap_err(), Error::NotAuthorized { role: _ }));

        // The failed attempt must not have moved the status
        let unchanged = get_expense_by_id(&db, &expense.id).await?.unwrap();
        assert_eq!(unchanged.status, ExpenseStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_twice_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let user = create_test_user(&db, &org.id, UserRole::Employee).await?;

        let expense = create_test_expense(&db, &org.id, &user.id, dec!(75)).await?;
        submit_expense(&db, &expense.id).await?;

        let result = submit_expense(&db, &expense.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidStatusTransition { from: _, to: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_scope_loaders_filter_by_org_and_user() -> Result<()> {
        let db = setup_test_db().await?;
        let org = create_test_organization(&db, "Acme").await?;
        let other_org = create_test_organization(&db, "Globex").await?;
        let alice = create_test_user(&db, &org.id, UserRole::Employee).await?;
        let bob = create_test_user(&db, &org.id, UserRole::Employee).await?;
        let outsider = create_test_user(&db, &other_org.id, UserRole::Employee).await?;

        create_test_expense(&db, &org.id, &alice.id, dec!(10)).await?;
        create_test_expense(&db, &org.id, &bob.id, dec!(20)).await?;
        create_test_expense(&db, &other_org.id, &outsider.id, dec!(30)).await?;

        let org_scope = get_expenses_for_organization(&db, &org.id).await?;
        assert_eq!(org_scope.len(), 2);

        let alice_scope = get_expenses_for_user(&db, &org.id, &alice.id).await?;
        assert_eq!(alice_scope.len(), 1);
        assert_eq!(alice_scope[0].amount, Some(dec!(10)));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_unknown_expense() -> Result<()> {
        let db = setup_test_db().await?;

        let result = submit_expense(&db, "missing").await;
        assert!(matches!(result.unwrap_err(), Error::ExpenseNotFound { id: _ }));

        Ok(())
    }
}
