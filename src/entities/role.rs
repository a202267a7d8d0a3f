//! Role entity - Staff roles such as "Leader" or "Technical Support".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Unique identifier for the role
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the role
    #[sea_orm(unique)]
    pub name: String,
    /// When the role was created
    pub created_at: DateTimeUtc,
    /// When the role was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag - false hides the role from lookups
    pub is_active: bool,
}

/// Defines relationships between Role and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One role is held by many staff members
    #[sea_orm(has_many = "super::staff::Entity")]
    Staff,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
