//! # State Endpoints
//!
//! Handlers for POST /elevator_at_rest and POST /move_elevator.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use sea_orm::TransactionTrait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::MessageResponse;
use crate::repositories::StateRepository;
use crate::server::AppState;

/// Request body for marking the elevator at rest
#[derive(Debug, Deserialize, ToSchema)]
pub struct AtRestRequest {
    /// Floor the elevator is resting at
    #[schema(example = "G")]
    pub current_floor: String,
}

/// Request body for moving a resting elevator
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveRequest {
    /// Floor to move the elevator to
    #[schema(example = "3")]
    pub destination_floor: String,
}

/// Mark the elevator as resting at a floor
///
/// No floor validity check is performed here; the state log accepts whatever
/// floor the operator reports, matching the call-logging asymmetry of the
/// original service.
#[utoipa::path(
    post,
    path = "/elevator_at_rest",
    request_body = AtRestRequest,
    responses(
        (status = 201, description = "Elevator set to rest", body = MessageResponse),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "state"
)]
pub async fn set_elevator_at_rest(
    State(state): State<AppState>,
    payload: Result<Json<AtRestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;

    StateRepository::new(&state.db)
        .record(&request.current_floor, true)
        .await?;

    tracing::info!(current_floor = %request.current_floor, "elevator set to rest");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Elevator set to rest")),
    ))
}

/// Move a resting elevator to a destination floor
#[utoipa::path(
    post,
    path = "/move_elevator",
    request_body = MoveRequest,
    responses(
        (status = 201, description = "Elevator moved and set to rest", body = MessageResponse),
        (status = 400, description = "Invalid floor or elevator busy", body = ApiError, example = json!({
            "error": "Elevator is busy"
        })),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "state"
)]
pub async fn move_elevator(
    State(state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;

    if !state.building.is_valid_floor(&request.destination_floor) {
        return Err(ApiError::invalid_floor());
    }

    // Check-then-insert runs in one transaction so a concurrent call cannot
    // slip between the resting check and the new state row.
    let txn = state.db.begin().await?;

    let at_rest = StateRepository::new(&txn)
        .latest()
        .await?
        .map(|s| s.is_at_rest)
        .unwrap_or(false);

    if !at_rest {
        return Err(ApiError::elevator_busy());
    }

    // The move is modeled as instantaneous; no busy period is recorded.
    StateRepository::new(&txn)
        .record(&request.destination_floor, true)
        .await?;

    txn.commit().await?;

    tracing::info!(destination_floor = %request.destination_floor, "elevator moved");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Elevator moved to destination and set to rest",
        )),
    ))
}
