//! Identity records - customers, staff, roles and shifts.
//!
//! Creation validates input with `validator` rules mirroring the column limits.
//! Lookups only return active records; deactivation is a soft delete so that
//! tickets and assignments referring to the record stay intact.

use super::require_non_blank;
use crate::{
    entities::{Auditable, Customer, Role, Shift, Staff, customer, role, shift, staff},
    errors::{Error, Result},
};
use chrono::{NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};
use validator::Validate;

/// Input for registering a customer
#[derive(Debug, Clone, Validate)]
pub struct NewCustomer {
    /// Full name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// Contact email
    #[validate(
        email(message = "Email address is not valid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    /// Login name
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,
    /// Hash produced by the authentication layer
    #[validate(length(
        min = 1,
        max = 255,
        message = "Password hash must be between 1 and 255 characters"
    ))]
    pub password_hash: String,
    /// Optional phone number
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Input for registering a staff member
#[derive(Debug, Clone, Validate)]
pub struct NewStaff {
    /// Full name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// Work email
    #[validate(
        email(message = "Email address is not valid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    /// Login name
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,
    /// Hash produced by the authentication layer
    #[validate(length(
        min = 1,
        max = 255,
        message = "Password hash must be between 1 and 255 characters"
    ))]
    pub password_hash: String,
    /// Role the staff member holds
    pub role_id: i64,
    /// Optional phone number
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Creates a role. Names must be non-blank and at most 50 characters.
#[instrument(skip(db))]
pub async fn create_role(db: &DatabaseConnection, name: &str) -> Result<role::Model> {
    require_non_blank("Role name", name)?;
    let name = name.trim();
    if name.chars().count() > 50 {
        return Err(Error::Validation {
            message: "Role name must be at most 50 characters".to_string(),
        });
    }

    let mut role = role::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    role.stamp_created(Utc::now());

    let result = role.insert(db).await?;
    info!("Created role {} ({})", result.id, result.name);
    Ok(result)
}

/// Creates each named role that does not exist yet. Returns how many were inserted.
pub async fn ensure_roles(db: &DatabaseConnection, names: &[String]) -> Result<usize> {
    let mut created = 0;
    for name in names {
        let existing = Role::find()
            .filter(role::Column::Name.eq(name.trim()))
            .one(db)
            .await?;
        if existing.is_none() {
            create_role(db, name).await?;
            created += 1;
        }
    }
    Ok(created)
}

/// Finds an active role by id.
pub async fn get_role(db: &DatabaseConnection, role_id: i64) -> Result<Option<role::Model>> {
    Role::find_by_id(role_id)
        .filter(role::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists active roles alphabetically.
pub async fn list_roles(db: &DatabaseConnection) -> Result<Vec<role::Model>> {
    Role::find()
        .filter(role::Column::IsActive.eq(true))
        .order_by_asc(role::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Registers a customer. The email must be unique across all customers,
/// including deactivated ones.
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_customer(
    db: &DatabaseConnection,
    input: NewCustomer,
) -> Result<customer::Model> {
    input.validate()?;
    require_non_blank("Name", &input.name)?;
    require_non_blank("Username", &input.username)?;

    let email = input.email.trim().to_string();
    let taken = Customer::find()
        .filter(customer::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(Error::Validation {
            message: format!("Email {email} is already registered"),
        });
    }

    let now = Utc::now();
    let mut customer = customer::ActiveModel {
        name: Set(input.name.trim().to_string()),
        email: Set(email),
        username: Set(input.username.trim().to_string()),
        password_hash: Set(input.password_hash),
        registered_at: Set(now),
        phone: Set(input.phone),
        ..Default::default()
    };
    customer.stamp_created(now);

    let result = customer.insert(db).await?;
    info!("Registered customer {}", result.id);
    Ok(result)
}

/// Finds an active customer by id.
pub async fn get_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    find_active_customer(db, customer_id).await
}

/// Soft-deletes a customer. Their tickets are kept.
#[instrument(skip(db))]
pub async fn deactivate_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<customer::Model> {
    let customer = require_customer(db, customer_id).await?;
    let mut active: customer::ActiveModel = customer.into();
    active.deactivate(Utc::now());
    let result = active.update(db).await?;
    info!("Deactivated customer {}", customer_id);
    Ok(result)
}

/// Registers a staff member holding an existing, active role.
#[instrument(skip(db, input), fields(role_id = input.role_id))]
pub async fn create_staff(db: &DatabaseConnection, input: NewStaff) -> Result<staff::Model> {
    input.validate()?;
    require_non_blank("Name", &input.name)?;
    require_non_blank("Username", &input.username)?;

    if get_role(db, input.role_id).await?.is_none() {
        return Err(Error::Validation {
            message: format!("Unknown role {}", input.role_id),
        });
    }

    let now = Utc::now();
    let mut member = staff::ActiveModel {
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        username: Set(input.username.trim().to_string()),
        password_hash: Set(input.password_hash),
        role_id: Set(input.role_id),
        registered_at: Set(now),
        phone: Set(input.phone),
        ..Default::default()
    };
    member.stamp_created(now);

    let result = member.insert(db).await?;
    info!("Registered staff member {}", result.id);
    Ok(result)
}

/// Finds an active staff member by id.
pub async fn get_staff(db: &DatabaseConnection, staff_id: i64) -> Result<Option<staff::Model>> {
    find_active_staff(db, staff_id).await
}

/// Soft-deletes a staff member. Past assignments keep referring to them.
#[instrument(skip(db))]
pub async fn deactivate_staff(db: &DatabaseConnection, staff_id: i64) -> Result<staff::Model> {
    let member = require_staff(db, staff_id).await?;
    let mut active: staff::ActiveModel = member.into();
    active.deactivate(Utc::now());
    let result = active.update(db).await?;
    info!("Deactivated staff member {}", staff_id);
    Ok(result)
}

/// Creates a work shift. An end time earlier than the start time is accepted
/// and means the shift runs past midnight.
#[instrument(skip(db))]
pub async fn create_shift(
    db: &DatabaseConnection,
    name: &str,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<shift::Model> {
    require_non_blank("Shift name", name)?;
    if name.trim().chars().count() > 50 {
        return Err(Error::Validation {
            message: "Shift name must be at most 50 characters".to_string(),
        });
    }

    let mut shift = shift::ActiveModel {
        name: Set(name.trim().to_string()),
        start_time: Set(start_time),
        end_time: Set(end_time),
        ..Default::default()
    };
    shift.stamp_created(Utc::now());

    shift.insert(db).await.map_err(Into::into)
}

/// Lists active shifts ordered by start time.
pub async fn list_shifts(db: &DatabaseConnection) -> Result<Vec<shift::Model>> {
    Shift::find()
        .filter(shift::Column::IsActive.eq(true))
        .order_by_asc(shift::Column::StartTime)
        .all(db)
        .await
        .map_err(Into::into)
}

pub(crate) async fn find_active_customer<C>(
    db: &C,
    customer_id: i64,
) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    Customer::find_by_id(customer_id)
        .filter(customer::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

pub(crate) async fn find_active_staff<C>(db: &C, staff_id: i64) -> Result<Option<staff::Model>>
where
    C: ConnectionTrait,
{
    Staff::find_by_id(staff_id)
        .filter(staff::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`find_active_customer`] but an unresolved id is a `NotFound` error.
pub(crate) async fn require_customer<C>(db: &C, customer_id: i64) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    find_active_customer(db, customer_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Customer",
            id: customer_id,
        })
}

/// Like [`find_active_staff`] but an unresolved id is a `NotFound` error.
pub(crate) async fn require_staff<C>(db: &C, staff_id: i64) -> Result<staff::Model>
where
    C: ConnectionTrait,
{
    find_active_staff(db, staff_id).await?.ok_or(Error::NotFound {
        entity: "Staff",
        id: staff_id,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_customer_success() -> Result<()> {
        let db = setup_test_db().await?;

        let customer = create_customer(&db, new_customer_input("alice@example.com")).await?;

        assert_eq!(customer.email, "alice@example.com");
        assert!(customer.is_active);
        assert!(customer.updated_at.is_none());
        assert_eq!(get_customer(&db, customer.id).await?, Some(customer));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_customer_rejects_invalid_email() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_customer(&db, new_customer_input("not-an-email")).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_customer_rejects_blank_username() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = new_customer_input("bob@example.com");
        input.username = "   ".to_string();
        let result = create_customer(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_customer_rejects_long_name() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = new_customer_input("carol@example.com");
        input.name = "x".repeat(101);
        let result = create_customer(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_customer_email_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        create_customer(&db, new_customer_input("dup@example.com")).await?;
        let result = create_customer(&db, new_customer_input("dup@example.com")).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_staff_requires_existing_role() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_staff(&db, new_staff_input("agent@example.com", 999)).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let role = create_role(&db, "Technical Support").await?;
        let member = create_staff(&db, new_staff_input("agent@example.com", role.id)).await?;
        assert_eq!(member.role_id, role.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_role_rejects_blank_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_role(&db, "  ").await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_roles_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let names = vec!["Leader".to_string(), "Financial Staff".to_string()];

        assert_eq!(ensure_roles(&db, &names).await?, 2);
        assert_eq!(ensure_roles(&db, &names).await?, 0);

        let roles = list_roles(&db).await?;
        let role_names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(role_names, vec!["Financial Staff", "Leader"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_customer_hides_record() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "gone@example.com").await?;

        let deactivated = deactivate_customer(&db, customer.id).await?;
        assert!(!deactivated.is_active);
        assert!(deactivated.updated_at.is_some());
        assert_eq!(deactivated.created_at, customer.created_at);

        assert!(get_customer(&db, customer.id).await?.is_none());
        // Row is still there
        assert!(Customer::find_by_id(customer.id).one(&db).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_unknown_staff_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = deactivate_staff(&db, 42).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "Staff",
                id: 42
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_overnight_shift_is_accepted() -> Result<()> {
        let db = setup_test_db().await?;

        let night = create_shift(
            &db,
            "Night",
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        )
        .await?;
        let morning = create_shift(
            &db,
            "Morning",
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        )
        .await?;

        let shifts = list_shifts(&db).await?;
        assert_eq!(shifts, vec![morning, night]);
        Ok(())
    }
}
