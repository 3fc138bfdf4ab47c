//! Core business logic - framework-agnostic operations over loaded entities.
//!
//! Everything here computes over already-materialized models and decimals;
//! the async functions persist through the entity layer but the arithmetic
//! itself is pure and deterministic.

/// Budget utilization, spend tracking, and the budget ledger
pub mod budget;
/// Expense creation, lifecycle transitions, and scope loads
pub mod expense;
/// Exact-decimal arithmetic and rounding rules
pub mod money;
/// Policy compliance predicates
pub mod policy;
/// Read-side aggregation over expense scopes
pub mod report;
