//! Budget entity - Tracks allocated versus spent amounts for an organization.
//!
//! Each budget covers a period (monthly, quarterly, or annual) bounded by
//! start and end dates. `spent_amount` is the running sum of expense amounts
//! charged to the budget and is only mutated through the charge/release
//! operations in [`crate::core::budget`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier for the budget
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable name (e.g., "Q4 Travel Budget")
    pub name: String,
    /// Organization the budget belongs to
    pub organization_id: String,
    /// Restricts the budget to one category, None for organization-wide
    pub category_id: Option<String>,
    /// Budgeting period granularity
    pub period: BudgetPeriod,
    /// First day the budget covers
    pub start_date: Date,
    /// Last day the budget covers; the budget expires strictly after this
    pub end_date: Date,
    /// Total amount allocated for the period, always positive
    pub allocated_amount: Decimal,
    /// Running sum of expense amounts charged against the allocation
    pub spent_amount: Decimal,
    /// Utilization fraction at which the budget counts as near its limit
    pub alert_threshold: Decimal,
    /// Administrative on/off switch, independent of date-based expiry
    pub is_active: bool,
}

/// Period granularity for a budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BudgetPeriod {
    /// One calendar month
    #[sea_orm(string_value = "Monthly")]
    Monthly,
    /// One calendar quarter
    #[sea_orm(string_value = "Quarterly")]
    Quarterly,
    /// One calendar year
    #[sea_orm(string_value = "Annually")]
    Annually,
}

/// Defines relationships between Budget and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each budget belongs to one organization
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id"
    )]
    Organization,
    /// Optional category restriction
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
