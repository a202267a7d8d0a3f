//! Shared test utilities for the helpdesk core.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{identity, ticket},
    entities::{self, Auditable, RoleNeeded, TicketPriority},
    errors::{Error, Result},
};
use chrono::Duration;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, prelude::DateTimeUtc};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Customer registration input with sensible defaults for the given email.
pub fn new_customer_input(email: &str) -> identity::NewCustomer {
    identity::NewCustomer {
        name: "Test Customer".to_string(),
        email: email.to_string(),
        username: email.split('@').next().unwrap_or("customer").to_string(),
        password_hash: "$2a$10$testhash".to_string(),
        phone: Some("0123456789".to_string()),
    }
}

/// Staff registration input with sensible defaults for the given email and role.
pub fn new_staff_input(email: &str, role_id: i64) -> identity::NewStaff {
    identity::NewStaff {
        name: "Test Staff".to_string(),
        email: email.to_string(),
        username: email.split('@').next().unwrap_or("staff").to_string(),
        password_hash: "$2a$10$testhash".to_string(),
        role_id,
        phone: None,
    }
}

/// Creates a test customer with the given email.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::customer::Model> {
    identity::create_customer(db, new_customer_input(email)).await
}

/// Creates a test staff member holding `role_id`.
pub async fn create_test_staff(
    db: &DatabaseConnection,
    email: &str,
    role_id: i64,
) -> Result<entities::staff::Model> {
    identity::create_staff(db, new_staff_input(email, role_id)).await
}

/// Creates a test ticket with sensible defaults.
///
/// # Defaults
/// * `description`: "Test description"
/// * `priority`: Medium
pub async fn create_test_ticket(
    db: &DatabaseConnection,
    customer_id: i64,
    subject: &str,
) -> Result<entities::ticket::Model> {
    ticket::create_ticket(
        db,
        customer_id,
        subject,
        "Test description",
        TicketPriority::Medium,
    )
    .await
}

/// Everything most lifecycle tests need.
pub struct TicketFixture {
    /// In-memory database
    pub db: DatabaseConnection,
    /// Owner of `ticket`
    pub customer: entities::customer::Model,
    /// Staff member who hands out assignments
    pub leader: entities::staff::Model,
    /// Staff member who receives assignments
    pub agent: entities::staff::Model,
    /// Fresh `Open` ticket, "Cannot login" with High priority
    pub ticket: entities::ticket::Model,
}

/// Sets up a complete test environment with a customer, two staff members and
/// one open ticket.
pub async fn setup_with_ticket() -> Result<TicketFixture> {
    let db = setup_test_db().await?;
    let leader_role = identity::create_role(&db, "Leader").await?;
    let support_role = identity::create_role(&db, "Technical Support").await?;

    let customer = create_test_customer(&db, "customer@example.com").await?;
    let leader = create_test_staff(&db, "leader@example.com", leader_role.id).await?;
    let agent = create_test_staff(&db, "agent@example.com", support_role.id).await?;
    let ticket = ticket::create_ticket(
        &db,
        customer.id,
        "Cannot login",
        "The login form rejects my password",
        TicketPriority::High,
    )
    .await?;

    Ok(TicketFixture {
        db,
        customer,
        leader,
        agent,
        ticket,
    })
}

/// Inserts an assignment row with an explicit `assigned_at`, bypassing the
/// lifecycle checks. Used to build exact orderings and ties.
pub async fn insert_assignment_at(
    db: &DatabaseConnection,
    ticket_id: i64,
    assigned_to: i64,
    assigned_by: i64,
    assigned_at: DateTimeUtc,
) -> Result<entities::ticket_assign::Model> {
    let mut assignment = entities::ticket_assign::ActiveModel {
        ticket_id: Set(ticket_id),
        assigned_to: Set(assigned_to),
        assigned_by: Set(assigned_by),
        assigned_at: Set(assigned_at),
        role_needed: Set(RoleNeeded::TechnicalSupport),
        ..Default::default()
    };
    assignment.stamp_created(assigned_at);
    assignment.insert(db).await.map_err(Into::into)
}

/// Moves a ticket's `created_at` into the past.
pub async fn backdate_ticket(
    db: &DatabaseConnection,
    ticket_id: i64,
    age: Duration,
) -> Result<entities::ticket::Model> {
    let ticket = entities::Ticket::find_by_id(ticket_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Ticket",
            id: ticket_id,
        })?;
    let created_at = ticket.created_at - age;
    let mut active: entities::ticket::ActiveModel = ticket.into();
    active.created_at = Set(created_at);
    active.update(db).await.map_err(Into::into)
}
