//! Dashboard statistics over active tickets.

use crate::{
    entities::{Ticket, TicketPriority, TicketStatus, ticket},
    errors::Result,
};
use sea_orm::{Condition, prelude::*};
use serde::Serialize;

/// Ticket counts shown on the support dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketDashboardStats {
    /// All active tickets
    pub total: u64,
    /// Tickets nobody has picked up yet
    pub open: u64,
    /// Tickets waiting in `Resolved`; closed tickets are not counted
    pub resolved: u64,
    /// High priority tickets still `Open`
    pub urgent: u64,
}

/// Counts active tickets by lifecycle bucket.
pub async fn get_dashboard_stats(db: &DatabaseConnection) -> Result<TicketDashboardStats> {
    let active = Ticket::find().filter(ticket::Column::IsActive.eq(true));

    let total = active.clone().count(db).await?;
    let open = active
        .clone()
        .filter(ticket::Column::Status.eq(TicketStatus::Open))
        .count(db)
        .await?;
    let resolved = active
        .clone()
        .filter(ticket::Column::Status.eq(TicketStatus::Resolved))
        .count(db)
        .await?;
    let urgent = active
        .filter(
            Condition::all()
                .add(ticket::Column::Priority.eq(TicketPriority::High))
                .add(ticket::Column::Status.eq(TicketStatus::Open)),
        )
        .count(db)
        .await?;

    Ok(TicketDashboardStats {
        total,
        open,
        resolved,
        urgent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ticket::{advance_ticket, close_ticket, create_ticket};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_empty_dashboard() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(
            get_dashboard_stats(&db).await?,
            TicketDashboardStats::default()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_buckets() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "alice@example.com").await?;

        let urgent_open =
            create_ticket(&db, customer.id, "Site down", "500 errors", TicketPriority::High)
                .await?;
        let urgent_working =
            create_ticket(&db, customer.id, "Slow checkout", "Timeouts", TicketPriority::High)
                .await?;
        let urgent_closed =
            create_ticket(&db, customer.id, "Card declined", "Twice", TicketPriority::High)
                .await?;
        let resolved = create_test_ticket(&db, customer.id, "Question").await?;

        advance_ticket(&db, urgent_working.id, TicketStatus::InProgress).await?;
        close_ticket(&db, urgent_closed.id).await?;
        advance_ticket(&db, resolved.id, TicketStatus::Resolved).await?;

        let stats = get_dashboard_stats(&db).await?;
        assert_eq!(
            stats,
            TicketDashboardStats {
                total: 4,
                open: 1,
                // Closed tickets are not counted as resolved
                resolved: 1,
                // Only the High ticket still Open is urgent
                urgent: 1,
            }
        );
        assert_eq!(urgent_open.status, TicketStatus::Open);
        Ok(())
    }
}
