//! ElevatorCall entity model
//!
//! This module contains the SeaORM entity model for the elevator_calls table,
//! an append-only log of call requests. Rows are immutable once written.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// ElevatorCall entity representing one logged call request
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "elevator_calls")]
pub struct Model {
    /// Monotonically increasing surrogate key (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Timestamp when the call was logged, set server-side at write time
    pub timestamp: DateTimeUtc,

    /// Floor the call originated from
    pub current_floor: String,

    /// Floor the caller requested
    pub destination_floor: String,

    /// True if the call came from a floor panel, false for an in-cab panel
    pub is_external_call: bool,

    /// Whether the elevator was at rest immediately before this call
    pub elevator_at_rest: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
