//! Customer evaluations - a 1 to 5 score for a closed ticket.
//!
//! A ticket can be evaluated once, by the customer who owns it, after it is
//! Closed. Staff ratings aggregate the evaluations of every ticket a staff
//! member was ever assigned, so handing a ticket off keeps its rating.

use super::{identity, ticket::require_ticket};
use crate::{
    entities::{Auditable, Evaluation, TicketAssign, TicketStatus, evaluation, ticket_assign},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QuerySelect, Set, prelude::*};
use std::ops::RangeInclusive;
use tracing::{info, instrument};

const SCORE_RANGE: RangeInclusive<i32> = 1..=5;

/// Average score of the evaluated tickets a staff member has worked on
#[derive(Debug, Clone, PartialEq)]
pub struct StaffRatingSummary {
    /// Staff member the summary is about
    pub staff_id: i64,
    /// Mean score, 0.0 when there are no evaluations
    pub average_score: f64,
    /// Number of evaluations counted
    pub evaluation_count: usize,
}

/// Records a customer's evaluation of a closed ticket.
///
/// # Errors
/// - `Error::Validation` when the score is outside 1..=5 or the ticket belongs
///   to another customer
/// - `Error::NotFound` when the ticket or customer does not resolve
/// - `Error::InvalidState` when the ticket is not Closed or was already evaluated
#[instrument(skip(db, comment))]
pub async fn evaluate_ticket(
    db: &DatabaseConnection,
    customer_id: i64,
    ticket_id: i64,
    score: i32,
    comment: Option<String>,
) -> Result<evaluation::Model> {
    if !SCORE_RANGE.contains(&score) {
        return Err(Error::Validation {
            message: format!("Score must be between 1 and 5, got {score}"),
        });
    }

    let ticket = require_ticket(db, ticket_id).await?;
    if ticket.customer_id != customer_id {
        return Err(Error::Validation {
            message: format!("Customer {customer_id} cannot evaluate ticket {ticket_id}"),
        });
    }
    identity::require_customer(db, customer_id).await?;

    if ticket.status != TicketStatus::Closed {
        return Err(Error::InvalidState {
            message: format!(
                "Only closed tickets can be evaluated, ticket {ticket_id} is {:?}",
                ticket.status
            ),
        });
    }

    if get_evaluation_for_ticket(db, ticket_id).await?.is_some() {
        return Err(Error::InvalidState {
            message: format!("Ticket {ticket_id} has already been evaluated"),
        });
    }

    let comment = comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let mut evaluation = evaluation::ActiveModel {
        ticket_id: Set(ticket_id),
        customer_id: Set(customer_id),
        score: Set(score),
        comment: Set(comment),
        ..Default::default()
    };
    evaluation.stamp_created(Utc::now());

    let result = evaluation.insert(db).await?;
    info!("Ticket {} evaluated with score {}", ticket_id, score);
    Ok(result)
}

/// Finds the evaluation of a ticket, if any.
pub async fn get_evaluation_for_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<Option<evaluation::Model>> {
    Evaluation::find()
        .filter(evaluation::Column::TicketId.eq(ticket_id))
        .filter(evaluation::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Summarizes the evaluations of every ticket with an assignment row naming
/// `staff_id`. A ticket assigned to them more than once counts once.
pub async fn get_staff_rating_summary(
    db: &DatabaseConnection,
    staff_id: i64,
) -> Result<StaffRatingSummary> {
    let ticket_ids: Vec<i64> = TicketAssign::find()
        .select_only()
        .column(ticket_assign::Column::TicketId)
        .filter(ticket_assign::Column::AssignedTo.eq(staff_id))
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    let evaluations = if ticket_ids.is_empty() {
        Vec::new()
    } else {
        Evaluation::find()
            .filter(evaluation::Column::TicketId.is_in(ticket_ids))
            .filter(evaluation::Column::IsActive.eq(true))
            .all(db)
            .await?
    };

    let evaluation_count = evaluations.len();
    let (total, counted) = evaluations
        .iter()
        .fold((0.0, 0.0), |(total, counted), e| (total + f64::from(e.score), counted + 1.0));
    let average_score = if evaluation_count == 0 { 0.0 } else { total / counted };

    Ok(StaffRatingSummary {
        staff_id,
        average_score,
        evaluation_count,
    })
}
