//! Assignment registry - the append-only history of staff assignments per ticket.
//!
//! Assigning never edits an earlier row: every assignment, including a
//! reassignment, inserts a new `ticket_assignments` row. The most recent row
//! (latest `assigned_at`, highest id on ties) names the current assignee.

use super::{identity, ticket::require_ticket, ticket::transition};
use crate::{
    entities::{
        Auditable, RoleNeeded, Staff, Ticket, TicketAssign, TicketStatus, staff, ticket,
        ticket_assign,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    Paginator, QueryOrder, QuerySelect, Select, SelectModel, Set, TransactionTrait, prelude::*,
};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU64;
use tracing::{debug, info, instrument};

/// Assigns a ticket to a staff member.
///
/// Inserts an assignment row and, when the ticket is still `Open`, moves it to
/// `Assigned`. Later assignments leave the status alone.
///
/// Fails with `Error::NotFound` when the ticket, the assignee or the assigner
/// does not resolve, and with `Error::InvalidState` when the ticket is already
/// Resolved or Closed.
#[instrument(skip(db))]
pub async fn assign_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
    staff_id: i64,
    assigner_id: i64,
    role_needed: RoleNeeded,
) -> Result<ticket_assign::Model> {
    let assignment = record_assignment(db, ticket_id, staff_id, assigner_id, role_needed).await?;
    info!(
        "Ticket {} assigned to staff {} by {}",
        ticket_id, staff_id, assigner_id
    );
    Ok(assignment)
}

/// Hands a ticket to another staff member.
///
/// Always appends a new assignment row so the previous assignee stays in the
/// history. Failure modes match [`assign_ticket`].
#[instrument(skip(db))]
pub async fn reassign_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
    new_staff_id: i64,
    assigner_id: i64,
    role_needed: RoleNeeded,
) -> Result<ticket_assign::Model> {
    let assignment =
        record_assignment(db, ticket_id, new_staff_id, assigner_id, role_needed).await?;
    info!(
        "Ticket {} reassigned to staff {} by {}",
        ticket_id, new_staff_id, assigner_id
    );
    Ok(assignment)
}

async fn record_assignment(
    db: &DatabaseConnection,
    ticket_id: i64,
    staff_id: i64,
    assigner_id: i64,
    role_needed: RoleNeeded,
) -> Result<ticket_assign::Model> {
    let txn = db.begin().await?;

    let ticket = require_ticket(&txn, ticket_id).await?;
    identity::require_staff(&txn, staff_id).await?;
    identity::require_staff(&txn, assigner_id).await?;

    if ticket.status.is_finished() {
        return Err(Error::InvalidState {
            message: format!(
                "Ticket {} is {:?} and cannot be assigned",
                ticket.id, ticket.status
            ),
        });
    }

    let now = Utc::now();
    let mut assignment = ticket_assign::ActiveModel {
        ticket_id: Set(ticket_id),
        assigned_to: Set(staff_id),
        assigned_by: Set(assigner_id),
        assigned_at: Set(now),
        role_needed: Set(role_needed),
        ..Default::default()
    };
    assignment.stamp_created(now);
    let result = assignment.insert(&txn).await?;

    if ticket.status == TicketStatus::Open {
        transition(&txn, ticket, TicketStatus::Assigned, now).await?;
    }

    txn.commit().await?;
    Ok(result)
}

/// Returns the staff member named by the most recent assignment, or `None`
/// when the ticket has never been assigned.
///
/// The assignee is returned even if they have since been deactivated.
pub async fn get_current_assignee(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<Option<staff::Model>> {
    require_ticket(db, ticket_id).await?;

    let Some(latest) = latest_assignment(db, ticket_id).await? else {
        debug!("Ticket {} has never been assigned", ticket_id);
        return Ok(None);
    };

    Staff::find_by_id(latest.assigned_to)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the assignment history of a ticket, oldest first.
///
/// Each call re-queries the store, so the result reflects every assignment
/// committed so far.
pub async fn get_assignment_history(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<Vec<ticket_assign::Model>> {
    require_ticket(db, ticket_id).await?;
    history_query(ticket_id).all(db).await.map_err(Into::into)
}

/// Lazy, page-at-a-time view of the same ordering as [`get_assignment_history`].
///
/// Nothing is fetched until a page is requested; building a new paginator
/// restarts from the first page. Pages are numbered from 0.
pub fn assignment_history_pages(
    db: &DatabaseConnection,
    ticket_id: i64,
    page_size: NonZeroU64,
) -> Paginator<'_, DatabaseConnection, SelectModel<ticket_assign::Model>> {
    history_query(ticket_id).paginate(db, page_size.get())
}

/// Lists tickets whose current assignee is `staff_id`, most recently
/// assigned first.
pub async fn get_tickets_assigned_to(
    db: &DatabaseConnection,
    staff_id: i64,
) -> Result<Vec<ticket::Model>> {
    let candidate_ids: Vec<i64> = TicketAssign::find()
        .select_only()
        .column(ticket_assign::Column::TicketId)
        .filter(ticket_assign::Column::AssignedTo.eq(staff_id))
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    if candidate_ids.is_empty() {
        return Ok(Vec::new());
    }

    // Newest first across all candidate tickets: the first row seen per ticket
    // is its current assignment.
    let rows = TicketAssign::find()
        .filter(ticket_assign::Column::TicketId.is_in(candidate_ids))
        .order_by_desc(ticket_assign::Column::AssignedAt)
        .order_by_desc(ticket_assign::Column::Id)
        .all(db)
        .await?;

    let mut seen = HashSet::new();
    let mut current_ids = Vec::new();
    for row in rows {
        if seen.insert(row.ticket_id) && row.assigned_to == staff_id {
            current_ids.push(row.ticket_id);
        }
    }

    let mut tickets: HashMap<i64, ticket::Model> = Ticket::find()
        .filter(ticket::Column::Id.is_in(current_ids.clone()))
        .filter(ticket::Column::IsActive.eq(true))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    Ok(current_ids
        .into_iter()
        .filter_map(|id| tickets.remove(&id))
        .collect())
}

fn history_query(ticket_id: i64) -> Select<TicketAssign> {
    TicketAssign::find()
        .filter(ticket_assign::Column::TicketId.eq(ticket_id))
        .order_by_asc(ticket_assign::Column::AssignedAt)
        .order_by_asc(ticket_assign::Column::Id)
}

pub(crate) async fn latest_assignment<C>(
    db: &C,
    ticket_id: i64,
) -> Result<Option<ticket_assign::Model>>
where
    C: ConnectionTrait,
{
    TicketAssign::find()
        .filter(ticket_assign::Column::TicketId.eq(ticket_id))
        .order_by_desc(ticket_assign::Column::AssignedAt)
        .order_by_desc(ticket_assign::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}
