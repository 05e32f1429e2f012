//! # Call Endpoints
//!
//! Handlers for POST /elevator_call and GET /get_calls.

use axum::{
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::MessageResponse;
use crate::models::elevator_call::Model as CallModel;
use crate::repositories::{CallRepository, StateRepository};
use crate::server::AppState;

/// Request body for logging an elevator call
#[derive(Debug, Deserialize, ToSchema)]
pub struct LogCallRequest {
    /// Floor the call originates from
    #[schema(example = "G")]
    pub current_floor: String,
    /// Requested destination floor
    #[schema(example = "3")]
    pub destination_floor: String,
    /// True for a floor-panel call, false for an in-cab selection
    pub is_external_call: bool,
}

/// Query parameters for listing calls
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCallsQuery {
    /// Keep only calls logged while the elevator was at rest (default: false)
    pub at_rest_only: Option<bool>,
    /// Keep only calls whose external flag matches exactly (default: no filter)
    pub is_external_call: Option<bool>,
}

/// Call information for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CallInfo {
    /// When the call was logged (ISO-8601)
    #[schema(example = "2026-01-15T14:00:00Z")]
    pub timestamp: String,
    /// Floor the call originated from
    pub current_floor: String,
    /// Requested destination floor
    pub destination_floor: String,
    /// True for a floor-panel call
    pub is_external_call: bool,
    /// Whether the elevator was at rest immediately before the call
    pub elevator_at_rest: bool,
}

impl From<CallModel> for CallInfo {
    fn from(call: CallModel) -> Self {
        Self {
            timestamp: call.timestamp.to_rfc3339(),
            current_floor: call.current_floor,
            destination_floor: call.destination_floor,
            is_external_call: call.is_external_call,
            elevator_at_rest: call.elevator_at_rest,
        }
    }
}

/// Log an elevator call and set the elevator to busy
#[utoipa::path(
    post,
    path = "/elevator_call",
    request_body = LogCallRequest,
    responses(
        (status = 201, description = "Call logged and elevator set to busy", body = MessageResponse),
        (status = 400, description = "Invalid floor or outside operational hours", body = ApiError, example = json!({
            "error": "Invalid floor"
        })),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "calls"
)]
pub async fn log_elevator_call(
    State(state): State<AppState>,
    payload: Result<Json<LogCallRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;

    if !state.building.is_valid_floor(&request.current_floor)
        || !state.building.is_valid_floor(&request.destination_floor)
    {
        return Err(ApiError::invalid_floor());
    }

    if state.config.enforce_operational_hours
        && !state
            .building
            .is_within_operational_hours(Utc::now().time())
    {
        return Err(ApiError::outside_operational_hours());
    }

    // Snapshot the prior resting status and append both rows atomically.
    let txn = state.db.begin().await?;

    let was_at_rest = StateRepository::new(&txn)
        .latest()
        .await?
        .map(|s| s.is_at_rest)
        .unwrap_or(true);

    CallRepository::new(&txn)
        .record(
            &request.current_floor,
            &request.destination_floor,
            request.is_external_call,
            was_at_rest,
        )
        .await?;

    // Any call, internal or external, leaves the elevator busy.
    StateRepository::new(&txn)
        .record(&request.current_floor, false)
        .await?;

    txn.commit().await?;

    tracing::info!(
        current_floor = %request.current_floor,
        destination_floor = %request.destination_floor,
        is_external_call = request.is_external_call,
        was_at_rest,
        "elevator call logged"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Call logged and elevator set to busy")),
    ))
}

/// List logged calls, optionally filtered
#[utoipa::path(
    get,
    path = "/get_calls",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Calls in ascending timestamp order", body = [CallInfo]),
        (status = 400, description = "Invalid query string", body = ApiError),
        (status = 500, description = "Database error", body = ApiError)
    ),
    tag = "calls"
)]
pub async fn get_calls(
    State(state): State<AppState>,
    query: Result<Query<ListCallsQuery>, QueryRejection>,
) -> Result<Json<Vec<CallInfo>>, ApiError> {
    let Query(query) = query?;

    let calls = CallRepository::new(&state.db)
        .list(
            query.at_rest_only.unwrap_or(false),
            query.is_external_call,
        )
        .await?;

    Ok(Json(calls.into_iter().map(CallInfo::from).collect()))
}
