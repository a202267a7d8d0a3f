//! Core business logic - framework-agnostic ticket, assignment and identity operations.
//!
//! Every function takes a SeaORM connection and returns [`crate::errors::Result`].
//! Mutations that read a ticket's status before writing run inside a single
//! database transaction, which serializes concurrent writers on the same ticket.

/// Inactivity sweep that closes stale in-progress tickets
pub mod auto_close;
/// Append-only assignment history and current-assignee lookups
pub mod assignment;
/// Customer evaluations of closed tickets
pub mod evaluation;
/// Customers, staff, roles and shifts
pub mod identity;
/// Conversation replies on tickets
pub mod reply;
/// Aggregate ticket counts for dashboards
pub mod stats;
/// Ticket creation and the status state machine
pub mod ticket;

use crate::errors::{Error, Result};

/// Rejects empty or whitespace-only input for a required text field.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("{field} cannot be empty"),
        });
    }
    Ok(())
}
