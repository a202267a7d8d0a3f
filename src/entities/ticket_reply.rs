//! Ticket reply entity - Conversation messages on a ticket.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Who wrote a reply
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SenderType {
    /// The customer who owns the ticket
    #[sea_orm(string_value = "customer")]
    Customer,
    /// A staff member
    #[sea_orm(string_value = "staff")]
    Staff,
}

/// Ticket reply database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_replies")]
pub struct Model {
    /// Unique identifier for the reply
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ticket the reply belongs to
    pub ticket_id: i64,
    /// Whether `sender_id` is a customer or a staff id
    pub sender_type: SenderType,
    /// Customer or staff id depending on `sender_type`
    pub sender_id: i64,
    /// Message body
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Optional attached image
    pub image_url: Option<String>,
    /// When the reply was posted
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between `TicketReply` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reply belongs to one ticket
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
