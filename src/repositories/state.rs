//! # Elevator State Repository
//!
//! Append and latest-row access for the elevator_states log. The latest state
//! is resolved by the monotonic id column, not by timestamp, so rows written
//! within the same clock tick still order deterministically.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::models::elevator_state::{ActiveModel, Column, Entity as ElevatorState, Model};

/// Repository for ElevatorState database operations
pub struct StateRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StateRepository<'a, C> {
    /// Create a new StateRepository over the given connection or transaction
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Returns the current state, i.e. the most recently inserted row.
    pub async fn latest(&self) -> Result<Option<Model>, DbErr> {
        ElevatorState::find()
            .order_by_desc(Column::Id)
            .one(self.conn)
            .await
    }

    /// Appends a new state transition, timestamped server-side.
    pub async fn record(&self, current_floor: &str, is_at_rest: bool) -> Result<Model, DbErr> {
        let state = ActiveModel {
            timestamp: Set(Utc::now()),
            current_floor: Set(current_floor.to_string()),
            is_at_rest: Set(is_at_rest),
            ..Default::default()
        };
        state.insert(self.conn).await
    }

    /// Number of state rows; used to make bootstrap seeding idempotent.
    pub async fn count(&self) -> Result<u64, DbErr> {
        ElevatorState::find().count(self.conn).await
    }
}
