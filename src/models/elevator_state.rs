//! ElevatorState entity model
//!
//! Append-only log of state transitions. The row with the highest id is the
//! elevator's current state; ids are the authoritative ordering key so that
//! identical timestamps cannot make "latest" ambiguous.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// ElevatorState entity representing one state transition
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "elevator_states")]
pub struct Model {
    /// Monotonically increasing surrogate key (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Timestamp when the transition was recorded
    pub timestamp: DateTimeUtc,

    /// Floor the elevator is at for this state
    pub current_floor: String,

    /// True if stationary and idle at current_floor, false if in transit
    pub is_at_rest: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
