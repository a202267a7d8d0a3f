//! Customer entity - People who own tickets and evaluate support.
//!
//! Password is stored as an opaque hash produced by the authentication layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact email, unique across customers
    #[sea_orm(unique)]
    pub email: String,
    /// Login name
    pub username: String,
    /// Password hash, never the plain password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the customer registered
    pub registered_at: DateTimeUtc,
    /// Optional phone number
    pub phone: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer owns many tickets
    #[sea_orm(has_many = "super::ticket::Entity")]
    Tickets,
    /// One customer writes many evaluations
    #[sea_orm(has_many = "super::evaluation::Entity")]
    Evaluations,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
