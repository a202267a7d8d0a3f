//! Evaluation entity - A customer's 1 to 5 score for a closed ticket.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Evaluation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    /// Unique identifier for the evaluation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Evaluated ticket, at most one evaluation each
    #[sea_orm(unique)]
    pub ticket_id: i64,
    /// Customer who wrote the evaluation
    pub customer_id: i64,
    /// Score between 1 and 5
    pub score: i32,
    /// Optional free-text comment
    pub comment: Option<String>,
    /// When the evaluation was submitted
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between Evaluation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each evaluation belongs to one ticket
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
    /// Each evaluation is written by one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
