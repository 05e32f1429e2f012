//! # Elevator Call Repository
//!
//! Append and filtered-listing access for the elevator_calls log.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::models::elevator_call::{ActiveModel, Column, Entity as ElevatorCall, Model};

/// Repository for ElevatorCall database operations
pub struct CallRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CallRepository<'a, C> {
    /// Create a new CallRepository over the given connection or transaction
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Appends a new call row, timestamped server-side.
    ///
    /// `elevator_at_rest` is the resting status that held immediately before
    /// the call was processed, read by the caller from the state log.
    pub async fn record(
        &self,
        current_floor: &str,
        destination_floor: &str,
        is_external_call: bool,
        elevator_at_rest: bool,
    ) -> Result<Model, DbErr> {
        let call = ActiveModel {
            timestamp: Set(Utc::now()),
            current_floor: Set(current_floor.to_string()),
            destination_floor: Set(destination_floor.to_string()),
            is_external_call: Set(is_external_call),
            elevator_at_rest: Set(elevator_at_rest),
            ..Default::default()
        };
        call.insert(self.conn).await
    }

    /// Lists calls in ascending timestamp order (id as tiebreak).
    ///
    /// # Arguments
    /// * `at_rest_only` - when true, keep only calls logged while at rest
    /// * `is_external_call` - when set, keep only calls matching that flag
    pub async fn list(
        &self,
        at_rest_only: bool,
        is_external_call: Option<bool>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = ElevatorCall::find();

        if at_rest_only {
            query = query.filter(Column::ElevatorAtRest.eq(true));
        }

        if let Some(external) = is_external_call {
            query = query.filter(Column::IsExternalCall.eq(external));
        }

        query
            .order_by_asc(Column::Timestamp)
            .order_by_asc(Column::Id)
            .all(self.conn)
            .await
    }
}
