use rust_decimal::Decimal;
use thiserror::Error;

use crate::entities::{expense::ExpenseStatus, user::UserRole};

/// Crate-wide error type covering configuration, persistence, and domain
/// precondition failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Expense not found: {id}")]
    ExpenseNotFound { id: String },

    #[error("Budget not found: {id}")]
    BudgetNotFound { id: String },

    #[error("Policy not found: {id}")]
    PolicyNotFound { id: String },

    #[error("Invalid expense status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: ExpenseStatus,
        to: ExpenseStatus,
    },

    #[error("Role {role:?} is not permitted to approve or reject expenses")]
    NotAuthorized { role: UserRole },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
