//! User entity - Members of an organization.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Login email, unique per organization
    pub email: String,
    /// Display name
    pub name: String,
    /// Role controlling what the user may do
    pub role: UserRole,
    /// Organization the user belongs to
    pub organization_id: String,
}

/// Role of a user within an organization.
///
/// Managers and admins may approve or reject submitted expenses; employees
/// and accountants may not.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    /// Submits expenses
    #[sea_orm(string_value = "EMPLOYEE")]
    Employee,
    /// Approves expenses for their team
    #[sea_orm(string_value = "MANAGER")]
    Manager,
    /// Full administrative access
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Read access to reports and reimbursement runs
    #[sea_orm(string_value = "ACCOUNTANT")]
    Accountant,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each user belongs to one organization
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id"
    )]
    Organization,
    /// One user has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
