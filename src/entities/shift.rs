//! Shift entity - Named work shifts with a start and end time of day.
//!
//! `start_time < end_time` is not enforced: overnight shifts wrap past midnight.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shift database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shifts")]
pub struct Model {
    /// Unique identifier for the shift
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Shift name (e.g., "Morning")
    pub name: String,
    /// Time of day the shift starts
    pub start_time: Time,
    /// Time of day the shift ends
    pub end_time: Time,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_active: bool,
}

/// `Shift` has no relationships modelled here
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
