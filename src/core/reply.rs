//! Ticket replies - the conversation between a customer and support staff.
//!
//! Posting a reply never changes the ticket status; status only moves through
//! the lifecycle operations in [`super::ticket`].

use super::{identity, require_non_blank, ticket::require_ticket};
use crate::{
    entities::{Auditable, SenderType, TicketReply, TicketStatus, ticket_reply},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};
use validator::Validate;

/// Input for posting a reply
#[derive(Debug, Clone, Validate)]
pub struct NewReply {
    /// Ticket the reply belongs to
    pub ticket_id: i64,
    /// Whether the sender is the customer or a staff member
    pub sender_type: SenderType,
    /// Customer or staff id, depending on `sender_type`
    pub sender_id: i64,
    /// Message body
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
    /// Optional attached image
    #[validate(
        url(message = "Image URL is not valid"),
        length(max = 500, message = "Image URL must be at most 500 characters")
    )]
    pub image_url: Option<String>,
}

/// Posts a reply on a ticket.
///
/// Fails with `Error::Validation` for a blank message, a malformed image URL,
/// or a customer replying on a ticket they do not own; `Error::NotFound` when
/// the ticket or sender does not resolve; and `Error::InvalidState` when the
/// ticket is Closed.
#[instrument(skip(db, input), fields(ticket_id = input.ticket_id, sender = ?input.sender_type))]
pub async fn add_reply(db: &DatabaseConnection, input: NewReply) -> Result<ticket_reply::Model> {
    input.validate()?;
    require_non_blank("Message", &input.message)?;

    let ticket = require_ticket(db, input.ticket_id).await?;
    match input.sender_type {
        SenderType::Customer => {
            identity::require_customer(db, input.sender_id).await?;
            if ticket.customer_id != input.sender_id {
                return Err(Error::Validation {
                    message: format!(
                        "Customer {} does not own ticket {}",
                        input.sender_id, ticket.id
                    ),
                });
            }
        }
        SenderType::Staff => {
            identity::require_staff(db, input.sender_id).await?;
        }
    }

    if ticket.status == TicketStatus::Closed {
        return Err(Error::InvalidState {
            message: format!("Ticket {} is closed", ticket.id),
        });
    }

    let mut reply = ticket_reply::ActiveModel {
        ticket_id: Set(input.ticket_id),
        sender_type: Set(input.sender_type),
        sender_id: Set(input.sender_id),
        message: Set(input.message.trim().to_string()),
        image_url: Set(input.image_url),
        ..Default::default()
    };
    reply.stamp_created(Utc::now());

    let result = reply.insert(db).await?;
    info!("Added reply {} to ticket {}", result.id, result.ticket_id);
    Ok(result)
}

/// Lists the replies on a ticket in the order they were posted.
pub async fn get_replies_for_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<Vec<ticket_reply::Model>> {
    TicketReply::find()
        .filter(ticket_reply::Column::TicketId.eq(ticket_id))
        .filter(ticket_reply::Column::IsActive.eq(true))
        .order_by_asc(ticket_reply::Column::CreatedAt)
        .order_by_asc(ticket_reply::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Most recent reply written by the customer, if any.
pub(crate) async fn last_customer_reply<C>(
    db: &C,
    ticket_id: i64,
) -> Result<Option<ticket_reply::Model>>
where
    C: ConnectionTrait,
{
    TicketReply::find()
        .filter(ticket_reply::Column::TicketId.eq(ticket_id))
        .filter(ticket_reply::Column::SenderType.eq(SenderType::Customer))
        .filter(ticket_reply::Column::IsActive.eq(true))
        .order_by_desc(ticket_reply::Column::CreatedAt)
        .order_by_desc(ticket_reply::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}
