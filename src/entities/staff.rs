//! Staff entity - Support agents and leaders who work on tickets.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    /// Unique identifier for the staff member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Work email
    pub email: String,
    /// Login name
    pub username: String,
    /// Password hash, never the plain password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role held by this staff member
    pub role_id: i64,
    /// When the staff member was registered
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

/// Defines relationships between Staff and other entities
///
/// Assignments reference staff twice (assignee and assigner), so those
/// relations live on `ticket_assign` only.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each staff member holds one role
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
