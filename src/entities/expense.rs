//! Expense entity - A single submitted expense record.
//!
//! Expenses are owned by the submitting user, scoped to an organization, and
//! optionally reference a category and store. The amount is an exact decimal;
//! a draft may not have an amount yet.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Short human-readable title (e.g., "Client dinner", "Flight to Berlin")
    pub title: String,
    /// Expense amount before tax; None while a draft is incomplete
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code (e.g., "USD")
    pub currency: String,
    /// Calendar date the expense was incurred
    pub expense_date: Date,
    /// Current lifecycle status
    pub status: ExpenseStatus,
    /// User who submitted the expense
    pub user_id: String,
    /// Organization the expense belongs to
    pub organization_id: String,
    /// Category for reporting, None if uncategorized
    pub category_id: Option<String>,
    /// Store or vendor where the expense was incurred
    pub store_id: Option<String>,
    /// Reference to an uploaded receipt, None or blank if missing
    pub receipt_url: Option<String>,
    /// Tax portion of the expense; the total is amount + tax_amount
    pub tax_amount: Decimal,
    /// Tax rate applied, as a fraction
    pub tax_rate: Option<Decimal>,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// Lifecycle status of an expense.
///
/// Created Draft, moved to Pending on submission, resolved to Approved or
/// Rejected by an approver, and optionally Reimbursed after approval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ExpenseStatus {
    /// Created but not yet submitted for approval
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Submitted and awaiting an approval decision
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Accepted by an approver
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Declined by an approver
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    /// Paid out to the submitting user
    #[sea_orm(string_value = "REIMBURSED")]
    Reimbursed,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one organization
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id"
    )]
    Organization,
    /// Each expense is owned by the submitting user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Optional reporting category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Optional store or vendor
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
