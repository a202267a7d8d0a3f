//! Ticket assignment entity - Append-only history of who works on a ticket.
//!
//! Rows are inserted by the assignment registry and never edited afterwards,
//! apart from the shared audit columns. The most recent row names the current
//! assignee.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of expertise an assignment requires
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum RoleNeeded {
    /// Billing, refunds, invoices
    #[sea_orm(string_value = "financial_staff")]
    FinancialStaff,
    /// Product and account problems
    #[sea_orm(string_value = "technical_support")]
    TechnicalSupport,
}

/// Ticket assignment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_assignments")]
pub struct Model {
    /// Unique identifier, increasing in insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ticket being assigned
    pub ticket_id: i64,
    /// Staff member who receives the ticket
    pub assigned_to: i64,
    /// Staff member who made the assignment
    pub assigned_by: i64,
    /// When the assignment was made
    pub assigned_at: DateTimeUtc,
    /// Expertise the ticket needs
    pub role_needed: RoleNeeded,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between `TicketAssign` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment belongs to one ticket
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
    /// Staff member receiving the ticket
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::AssignedTo",
        to = "super::staff::Column::Id"
    )]
    AssignedTo,
    /// Staff member who assigned it
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::AssignedBy",
        to = "super::staff::Column::Id"
    )]
    AssignedBy,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
