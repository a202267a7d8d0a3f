//! Ticket entity - A customer support request tracked through a status lifecycle.
//!
//! Status only moves forward: Open → Assigned → InProgress → Resolved → Closed.
//! `closed_at` is populated exactly when the status is Resolved or Closed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How urgent a ticket is
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TicketPriority {
    /// Can wait
    #[sea_orm(string_value = "low")]
    Low,
    /// Normal handling
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Counted as urgent on the dashboard
    #[sea_orm(string_value = "high")]
    High,
}

/// Lifecycle status of a ticket.
///
/// Variants are declared in lifecycle order, so the derived `Ord` is the
/// forward ordering of the state machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TicketStatus {
    /// Newly created, nobody assigned yet
    #[sea_orm(string_value = "open")]
    Open,
    /// At least one staff member has been assigned
    #[sea_orm(string_value = "assigned")]
    Assigned,
    /// Staff has started working on it
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Staff considers the issue solved
    #[sea_orm(string_value = "resolved")]
    Resolved,
    /// Terminal state
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl TicketStatus {
    /// Resolved and Closed tickets are finished: no new assignments, and
    /// `closed_at` is set.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Whether `next` is strictly later in the lifecycle than `self`.
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        next > self
    }
}

/// Ticket database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    /// Unique identifier for the ticket
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer who owns the ticket
    pub customer_id: i64,
    /// Short summary, at most 200 characters
    pub subject: String,
    /// Full description of the problem
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Urgency
    pub priority: TicketPriority,
    /// Current lifecycle status
    pub status: TicketStatus,
    /// Set when the ticket enters Resolved or Closed
    pub closed_at: Option<DateTimeUtc>,
    /// When the ticket was created
    pub created_at: DateTimeUtc,
    /// When the ticket was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between Ticket and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ticket belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// One ticket has many assignment records
    #[sea_orm(has_many = "super::ticket_assign::Entity")]
    Assignments,
    /// One ticket has many replies
    #[sea_orm(has_many = "super::ticket_reply::Entity")]
    Replies,
    /// One ticket has at most one evaluation
    #[sea_orm(has_one = "super::evaluation::Entity")]
    Evaluation,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::ticket_assign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::ticket_reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_status_only_advances_forward() {
        assert!(TicketStatus::Open.can_advance_to(TicketStatus::Assigned));
        assert!(TicketStatus::Assigned.can_advance_to(TicketStatus::Closed));
        assert!(!TicketStatus::Resolved.can_advance_to(TicketStatus::InProgress));
        assert!(!TicketStatus::Closed.can_advance_to(TicketStatus::Open));
        assert!(!TicketStatus::InProgress.can_advance_to(TicketStatus::InProgress));
    }

    #[test]
    fn test_finished_statuses() {
        let finished: Vec<_> = TicketStatus::iter().filter(|s| s.is_finished()).collect();
        assert_eq!(finished, vec![TicketStatus::Resolved, TicketStatus::Closed]);
    }

    #[test]
    fn test_enum_serialization_contract() {
        assert_eq!(TicketStatus::InProgress.to_value(), "in_progress");
        assert_eq!(TicketPriority::High.to_value(), "high");
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).ok(),
            Some("\"in_progress\"".to_string())
        );
    }
}
