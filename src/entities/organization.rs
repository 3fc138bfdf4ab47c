//! Organization entity - The tenant boundary.
//!
//! Every expense, budget, policy, user, category, and store is scoped to
//! exactly one organization.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Organization database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    /// Unique identifier for the organization
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the organization
    pub name: String,
}

/// Defines relationships between Organization and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One organization has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One organization has many budgets
    #[sea_orm(has_many = "super::budget::Entity")]
    Budgets,
    /// One organization has many policies
    #[sea_orm(has_many = "super::policy::Entity")]
    Policies,
    /// One organization has many users
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
    /// One organization has many categories
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
    /// One organization has many stores
    #[sea_orm(has_many = "super::store::Entity")]
    Stores,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::budget::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::policy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Policies.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
