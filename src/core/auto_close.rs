//! Inactivity sweep for in-progress tickets.
//!
//! A ticket in `InProgress` is considered abandoned when the customer has not
//! replied within the inactivity window. The reference time is the customer's
//! last reply, or the ticket's creation time when the customer never replied.
//! Staff replies do not count as activity.

use super::{reply::last_customer_reply, ticket::transition};
use crate::{
    entities::{Ticket, TicketStatus, ticket},
    errors::{Error, Result},
};
use chrono::Duration;
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Outcome of one sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoCloseReport {
    /// Time the sweep ran, also used as `closed_at`
    pub swept_at: DateTimeUtc,
    /// Number of in-progress tickets looked at
    pub examined: usize,
    /// Ids of tickets that were closed
    pub closed_ticket_ids: Vec<i64>,
}

/// Closes every in-progress ticket with no customer activity since
/// `now - inactivity`.
///
/// All closures happen in one transaction: either every stale ticket is
/// closed or none is.
///
/// # Errors
/// Returns `Error::Validation` when `now - inactivity` is not a representable
/// time, and `Error::Database` when the sweep cannot be committed.
#[instrument(skip(db))]
pub async fn close_inactive_tickets(
    db: &DatabaseConnection,
    now: DateTimeUtc,
    inactivity: Duration,
) -> Result<AutoCloseReport> {
    let cutoff = now
        .checked_sub_signed(inactivity)
        .ok_or_else(|| Error::Validation {
            message: format!("Inactivity window {inactivity} reaches before the earliest time"),
        })?;
    let txn = db.begin().await?;

    let in_progress = Ticket::find()
        .filter(ticket::Column::Status.eq(TicketStatus::InProgress))
        .filter(ticket::Column::IsActive.eq(true))
        .order_by_asc(ticket::Column::Id)
        .all(&txn)
        .await?;

    let examined = in_progress.len();
    let mut closed_ticket_ids = Vec::new();

    for ticket in in_progress {
        let reference = last_customer_reply(&txn, ticket.id)
            .await?
            .map_or(ticket.created_at, |reply| reply.created_at);

        if reference < cutoff {
            debug!("Ticket {} inactive since {}, closing", ticket.id, reference);
            let closed = transition(&txn, ticket, TicketStatus::Closed, now).await?;
            closed_ticket_ids.push(closed.id);
        }
    }

    txn.commit().await?;

    info!(
        "Auto-close sweep examined {} in-progress tickets and closed {}",
        examined,
        closed_ticket_ids.len()
    );
    Ok(AutoCloseReport {
        swept_at: now,
        examined,
        closed_ticket_ids,
    })
}

/// Formats a sweep report into a single human-readable line for logging.
#[must_use]
pub fn format_auto_close_summary(report: &AutoCloseReport) -> String {
    if report.closed_ticket_ids.is_empty() {
        return format!(
            "Auto-close at {}: {} in-progress tickets, none inactive",
            report.swept_at.format("%Y-%m-%d %H:%M"),
            report.examined
        );
    }

    let ids: Vec<String> = report
        .closed_ticket_ids
        .iter()
        .map(ToString::to_string)
        .collect();
    format!(
        "Auto-close at {}: closed {} of {} in-progress tickets ({})",
        report.swept_at.format("%Y-%m-%d %H:%M"),
        report.closed_ticket_ids.len(),
        report.examined,
        ids.join(", ")
    )
}
