//! Shared test utilities for the expense engine.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults, plus plain in-memory
//! fixtures for the pure arithmetic and predicate tests.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{budget, expense, expense::ExpenseDraft, policy},
    entities,
    entities::{budget::BudgetPeriod, expense::ExpenseStatus, user::UserRole},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts an organization with the given name.
pub async fn create_test_organization(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::organization::Model> {
    let organization = entities::organization::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
    };
    Ok(organization.insert(db).await?)
}

/// Inserts a user with the given role into an organization.
///
/// The email is generated from a fresh id so repeated calls never collide.
pub async fn create_test_user(
    db: &DatabaseConnection,
    organization_id: &str,
    role: UserRole,
) -> Result<entities::user::Model> {
    let id = uuid::Uuid::new_v4().to_string();
    let user = entities::user::ActiveModel {
        id: Set(id.clone()),
        email: Set(format!("{id}@test.local")),
        name: Set("Test User".to_string()),
        role: Set(role),
        organization_id: Set(organization_id.to_string()),
    };
    Ok(user.insert(db).await?)
}

/// Inserts a category with the given name into an organization.
pub async fn create_test_category(
    db: &DatabaseConnection,
    organization_id: &str,
    name: &str,
) -> Result<entities::category::Model> {
    let category = entities::category::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        organization_id: Set(organization_id.to_string()),
    };
    Ok(category.insert(db).await?)
}

/// A complete expense draft with sensible defaults.
///
/// # Defaults
/// * `title`: "Test Expense"
/// * `currency`: "USD"
/// * `expense_date`: 2025-06-15
/// * no category, store, or receipt
/// * `tax_amount`: 0
#[must_use]
pub fn test_expense_draft(organization_id: &str, user_id: &str, amount: Decimal) -> ExpenseDraft {
    ExpenseDraft {
        title: "Test Expense".to_string(),
        amount: Some(amount),
        currency: "USD".to_string(),
        expense_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        user_id: user_id.to_string(),
        organization_id: organization_id.to_string(),
        category_id: None,
        store_id: None,
        receipt_url: None,
        tax_amount: Decimal::ZERO,
        tax_rate: None,
    }
}

/// Creates a test expense through the normal creation path.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    organization_id: &str,
    user_id: &str,
    amount: Decimal,
) -> Result<entities::expense::Model> {
    expense::create_expense(db, test_expense_draft(organization_id, user_id, amount)).await
}

/// Creates a test budget with sensible defaults.
///
/// # Defaults
/// * `period`: Monthly, covering June 2025
/// * `allocated_amount`: 1000
/// * default alert threshold
pub async fn create_test_budget(
    db: &DatabaseConnection,
    organization_id: &str,
    name: &str,
) -> Result<entities::budget::Model> {
    budget::create_budget(
        db,
        name.to_string(),
        organization_id.to_string(),
        None,
        BudgetPeriod::Monthly,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        dec!(1000),
        None,
    )
    .await
}

/// Creates a test policy with sensible defaults (receipt and approval
/// required, no amount limits).
pub async fn create_test_policy(
    db: &DatabaseConnection,
    organization_id: &str,
    name: &str,
) -> Result<entities::policy::Model> {
    policy::create_policy(
        db,
        name.to_string(),
        organization_id.to_string(),
        None,
        None,
        true,
        true,
        None,
    )
    .await
}

/// In-memory expense model for pure-function tests; never persisted.
#[must_use]
pub fn expense_fixture(id: &str, amount: Option<Decimal>) -> entities::expense::Model {
    entities::expense::Model {
        id: id.to_string(),
        title: "Fixture Expense".to_string(),
        amount,
        currency: "USD".to_string(),
        expense_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        status: ExpenseStatus::Draft,
        user_id: "user-1".to_string(),
        organization_id: "org-1".to_string(),
        category_id: None,
        store_id: None,
        receipt_url: None,
        tax_amount: Decimal::ZERO,
        tax_rate: None,
        created_at: chrono::Utc::now(),
    }
}

/// In-memory budget model for pure-function tests; never persisted.
#[must_use]
pub fn budget_fixture(allocated: Decimal, spent: Decimal) -> entities::budget::Model {
    entities::budget::Model {
        id: "budget-1".to_string(),
        name: "Fixture Budget".to_string(),
        organization_id: "org-1".to_string(),
        category_id: None,
        period: BudgetPeriod::Monthly,
        start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        allocated_amount: allocated,
        spent_amount: spent,
        alert_threshold: dec!(0.80),
        is_active: true,
    }
}

/// In-memory policy model for pure-function tests; never persisted.
///
/// Active, receipt and approval required, no amount limits; tests override
/// the fields they exercise.
#[must_use]
pub fn policy_fixture() -> entities::policy::Model {
    entities::policy::Model {
        id: "policy-1".to_string(),
        name: "Fixture Policy".to_string(),
        organization_id: "org-1".to_string(),
        category_id: None,
        max_amount: None,
        requires_receipt: true,
        requires_approval: true,
        approval_threshold: None,
        is_active: true,
    }
}
