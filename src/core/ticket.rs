//! Ticket lifecycle - creation and status transitions.
//!
//! Status moves strictly forward through Open, Assigned, InProgress, Resolved
//! and Closed; skipping ahead is allowed, moving back or staying put is not.
//! Entering Resolved or Closed stamps `closed_at`, so `closed_at` is set exactly
//! when the ticket is finished. Every successful transition stamps `updated_at`.

use super::{identity, require_non_blank};
use crate::{
    entities::{Auditable, Ticket, TicketPriority, TicketStatus, ticket},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

const MAX_SUBJECT_LEN: usize = 200;

/// Opens a new ticket for a customer.
///
/// The ticket starts in `Open` with no `closed_at`. Fails with
/// `Error::Validation` when the subject or description is blank, the subject
/// is longer than 200 characters, or the customer does not resolve to an
/// active record.
#[instrument(skip(db, description))]
pub async fn create_ticket(
    db: &DatabaseConnection,
    customer_id: i64,
    subject: &str,
    description: &str,
    priority: TicketPriority,
) -> Result<ticket::Model> {
    require_non_blank("Subject", subject)?;
    require_non_blank("Description", description)?;

    let subject = subject.trim();
    if subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(Error::Validation {
            message: format!("Subject must be at most {MAX_SUBJECT_LEN} characters"),
        });
    }

    if identity::find_active_customer(db, customer_id).await?.is_none() {
        return Err(Error::Validation {
            message: format!("Unknown customer {customer_id}"),
        });
    }

    let mut ticket = ticket::ActiveModel {
        customer_id: Set(customer_id),
        subject: Set(subject.to_string()),
        description: Set(description.trim().to_string()),
        priority: Set(priority),
        status: Set(TicketStatus::Open),
        closed_at: Set(None),
        ..Default::default()
    };
    ticket.stamp_created(Utc::now());

    let result = ticket.insert(db).await?;
    info!(
        "Created ticket {} for customer {} with priority {:?}",
        result.id, customer_id, priority
    );
    Ok(result)
}

/// Moves a ticket to a later status.
///
/// Fails with `Error::InvalidState` unless `new_status` comes strictly after
/// the current status. The read and the write happen in one transaction.
#[instrument(skip(db))]
pub async fn advance_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
    new_status: TicketStatus,
) -> Result<ticket::Model> {
    let txn = db.begin().await?;

    let ticket = require_ticket(&txn, ticket_id).await?;
    let updated = transition(&txn, ticket, new_status, Utc::now()).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Closes a ticket. Closing an already closed ticket is a no-op.
#[instrument(skip(db))]
pub async fn close_ticket(db: &DatabaseConnection, ticket_id: i64) -> Result<ticket::Model> {
    let txn = db.begin().await?;

    let ticket = require_ticket(&txn, ticket_id).await?;
    if ticket.status == TicketStatus::Closed {
        debug!("Ticket {} already closed", ticket_id);
        return Ok(ticket);
    }

    let updated = transition(&txn, ticket, TicketStatus::Closed, Utc::now()).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Finds an active ticket by id.
pub async fn get_ticket(db: &DatabaseConnection, ticket_id: i64) -> Result<Option<ticket::Model>> {
    find_active_ticket(db, ticket_id).await
}

/// Lists a customer's tickets, newest first.
pub async fn get_tickets_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<ticket::Model>> {
    Ticket::find()
        .filter(ticket::Column::CustomerId.eq(customer_id))
        .filter(ticket::Column::IsActive.eq(true))
        .order_by_desc(ticket::Column::CreatedAt)
        .order_by_desc(ticket::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists tickets in the given status, oldest first.
pub async fn get_tickets_by_status(
    db: &DatabaseConnection,
    status: TicketStatus,
) -> Result<Vec<ticket::Model>> {
    Ticket::find()
        .filter(ticket::Column::Status.eq(status))
        .filter(ticket::Column::IsActive.eq(true))
        .order_by_asc(ticket::Column::CreatedAt)
        .order_by_asc(ticket::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a forward transition to an already loaded ticket.
///
/// Callers hold the transaction that loaded `ticket`.
pub(crate) async fn transition<C>(
    db: &C,
    ticket: ticket::Model,
    next: TicketStatus,
    now: DateTimeUtc,
) -> Result<ticket::Model>
where
    C: ConnectionTrait,
{
    let current = ticket.status;
    if !current.can_advance_to(next) {
        return Err(Error::InvalidState {
            message: format!(
                "Ticket {} cannot move from {current:?} to {next:?}",
                ticket.id
            ),
        });
    }

    let mut active: ticket::ActiveModel = ticket.into();
    active.status = Set(next);
    if next.is_finished() {
        active.closed_at = Set(Some(now));
    }
    active.touch(now);

    let updated = active.update(db).await?;
    info!(
        "Ticket {} moved from {:?} to {:?}",
        updated.id, current, updated.status
    );
    Ok(updated)
}

pub(crate) async fn find_active_ticket<C>(db: &C, ticket_id: i64) -> Result<Option<ticket::Model>>
where
    C: ConnectionTrait,
{
    Ticket::find_by_id(ticket_id)
        .filter(ticket::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`find_active_ticket`] but an unresolved id is a `NotFound` error.
pub(crate) async fn require_ticket<C>(db: &C, ticket_id: i64) -> Result<ticket::Model>
where
    C: ConnectionTrait,
{
    find_active_ticket(db, ticket_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Ticket",
            id: ticket_id,
        })
}
