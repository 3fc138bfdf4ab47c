//! Policy entity - Per-organization spending constraints.
//!
//! A policy caps single-expense amounts, requires receipts, and marks the
//! threshold above which manual approval is mandatory. Policies hold no
//! per-expense state; compliance is evaluated per call in
//! [`crate::core::policy`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Policy database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "policies")]
pub struct Model {
    /// Unique identifier for the policy
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable name (e.g., "Travel Expense Limit")
    pub name: String,
    /// Organization the policy belongs to
    pub organization_id: String,
    /// Restricts the policy to one category, None for organization-wide
    pub category_id: Option<String>,
    /// Hard cap on a single expense amount, None for uncapped
    pub max_amount: Option<Decimal>,
    /// Whether expenses under this policy must carry a receipt
    pub requires_receipt: bool,
    /// Whether expenses at or above the approval threshold need manual approval
    pub requires_approval: bool,
    /// Amount at which manual approval becomes mandatory
    pub approval_threshold: Option<Decimal>,
    /// Inactive policies never restrict anything
    pub is_active: bool,
}

/// Defines relationships between Policy and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each policy belongs to one organization
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
