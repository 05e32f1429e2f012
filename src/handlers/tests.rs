//! # Tests for Handlers
//!
//! Unit tests exercising the handlers directly against an in-memory database.

use std::sync::Arc;

use axum::{extract::Query, extract::State, http::StatusCode, response::Json};
use chrono::{Timelike, Utc};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};

use crate::config::{AppConfig, BuildingConfig};
use crate::handlers::calls::{ListCallsQuery, LogCallRequest, get_calls, log_elevator_call};
use crate::handlers::root;
use crate::handlers::state::{AtRestRequest, MoveRequest, move_elevator, set_elevator_at_rest};
use crate::repositories::StateRepository;
use crate::server::AppState;

fn building(start: &str, end: &str) -> BuildingConfig {
    BuildingConfig::new(
        vec!["G".into(), "1".into(), "2".into(), "3".into()],
        start,
        end,
        "G".into(),
    )
    .unwrap()
}

/// A wall-clock window guaranteed to contain the current time.
fn window_containing_now() -> (&'static str, &'static str) {
    if Utc::now().time().hour() < 12 {
        ("00:00", "12:59")
    } else {
        ("12:00", "23:59")
    }
}

/// A wall-clock window guaranteed to exclude the current time.
fn window_excluding_now() -> (&'static str, &'static str) {
    if Utc::now().time().hour() < 12 {
        ("22:00", "23:00")
    } else {
        ("01:00", "02:00")
    }
}

async fn test_state(enforce_hours: bool, start: &str, end: &str) -> AppState {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let db = Database::connect(opt).await.expect("connect in-memory db");
    migration::Migrator::up(&db, None)
        .await
        .expect("apply migrations");

    AppState {
        config: Arc::new(AppConfig {
            enforce_operational_hours: enforce_hours,
            ..Default::default()
        }),
        building: Arc::new(building(start, end)),
        db,
    }
}

fn call_request(current: &str, destination: &str, external: bool) -> LogCallRequest {
    LogCallRequest {
        current_floor: current.to_string(),
        destination_floor: destination.to_string(),
        is_external_call: external,
    }
}

async fn list_all(state: &AppState) -> Vec<crate::handlers::calls::CallInfo> {
    let Json(calls) = get_calls(
        State(state.clone()),
        Ok(Query(ListCallsQuery {
            at_rest_only: None,
            is_external_call: None,
        })),
    )
    .await
    .unwrap();
    calls
}

#[tokio::test]
async fn test_root_handler_returns_service_info() {
    let Json(info) = root().await;
    assert_eq!(info.service, "elevator-backend");
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_first_call_records_prior_rest_as_true() {
    // No prior state exists, so the snapshot defaults to at rest.
    let state = test_state(false, "00:00", "23:59").await;

    let (status, Json(body)) = log_elevator_call(
        State(state.clone()),
        Ok(Json(call_request("G", "3", true))),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message, "Call logged and elevator set to busy");

    let calls = list_all(&state).await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].elevator_at_rest);

    let latest = StateRepository::new(&state.db)
        .latest()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.current_floor, "G");
    assert!(!latest.is_at_rest);
}

#[tokio::test]
async fn test_consecutive_calls_always_leave_busy() {
    let state = test_state(false, "00:00", "23:59").await;

    for i in 0..5 {
        let floor = if i % 2 == 0 { "1" } else { "2" };
        log_elevator_call(
            State(state.clone()),
            Ok(Json(call_request(floor, "3", i % 2 == 0))),
        )
        .await
        .unwrap();

        let latest = StateRepository::new(&state.db)
            .latest()
            .await
            .unwrap()
            .unwrap();
        assert!(!latest.is_at_rest, "call {i} must leave the elevator busy");
    }

    // Only the very first call saw the elevator at rest.
    let calls = list_all(&state).await;
    assert_eq!(calls.len(), 5);
    assert!(calls[0].elevator_at_rest);
    assert!(calls[1..].iter().all(|c| !c.elevator_at_rest));
}

#[tokio::test]
async fn test_call_with_invalid_floor_rejected() {
    let state = test_state(false, "00:00", "23:59").await;

    for (current, destination) in [("B", "3"), ("G", "9"), ("B", "9")] {
        let err = log_elevator_call(
            State(state.clone()),
            Ok(Json(call_request(current, destination, true))),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, Box::from("Invalid floor"));
    }

    assert!(list_all(&state).await.is_empty());
}

#[tokio::test]
async fn test_call_outside_operational_hours_rejected() {
    let (start, end) = window_excluding_now();
    let state = test_state(true, start, end).await;

    let err = log_elevator_call(State(state.clone()), Ok(Json(call_request("G", "3", true))))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, Box::from("Outside operational hours"));
}

#[tokio::test]
async fn test_call_within_operational_hours_accepted() {
    let (start, end) = window_containing_now();
    let state = test_state(true, start, end).await;

    let (status, _) =
        log_elevator_call(State(state.clone()), Ok(Json(call_request("G", "3", true))))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_hours_check_disabled_by_configuration() {
    let (start, end) = window_excluding_now();
    let state = test_state(false, start, end).await;

    let (status, _) =
        log_elevator_call(State(state.clone()), Ok(Json(call_request("G", "3", true))))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_floor_validation_precedes_hours_check() {
    let (start, end) = window_excluding_now();
    let state = test_state(true, start, end).await;

    let err = log_elevator_call(State(state.clone()), Ok(Json(call_request("B", "3", true))))
        .await
        .unwrap_err();
    assert_eq!(err.error, Box::from("Invalid floor"));
}

#[tokio::test]
async fn test_at_rest_skips_floor_validation() {
    let state = test_state(false, "00:00", "23:59").await;

    let (status, Json(body)) = set_elevator_at_rest(
        State(state.clone()),
        Ok(Json(AtRestRequest {
            current_floor: "penthouse".to_string(),
        })),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message, "Elevator set to rest");

    let latest = StateRepository::new(&state.db)
        .latest()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.current_floor, "penthouse");
    assert!(latest.is_at_rest);
}

#[tokio::test]
async fn test_move_requires_resting_state() {
    let state = test_state(false, "00:00", "23:59").await;

    // No state at all: a move has nothing resting to act on.
    let err = move_elevator(
        State(state.clone()),
        Ok(Json(MoveRequest {
            destination_floor: "3".to_string(),
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error, Box::from("Elevator is busy"));

    // Busy latest state: still rejected.
    StateRepository::new(&state.db).record("G", false).await.unwrap();
    let err = move_elevator(
        State(state.clone()),
        Ok(Json(MoveRequest {
            destination_floor: "3".to_string(),
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, Box::from("Elevator is busy"));
}

#[tokio::test]
async fn test_move_from_rest_succeeds() {
    let state = test_state(false, "00:00", "23:59").await;
    StateRepository::new(&state.db).record("G", true).await.unwrap();

    let (status, Json(body)) = move_elevator(
        State(state.clone()),
        Ok(Json(MoveRequest {
            destination_floor: "3".to_string(),
        })),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message, "Elevator moved to destination and set to rest");

    let latest = StateRepository::new(&state.db)
        .latest()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.current_floor, "3");
    assert!(latest.is_at_rest);
}

#[tokio::test]
async fn test_move_with_invalid_floor_rejected() {
    let state = test_state(false, "00:00", "23:59").await;
    StateRepository::new(&state.db).record("G", true).await.unwrap();

    let err = move_elevator(
        State(state.clone()),
        Ok(Json(MoveRequest {
            destination_floor: "42".to_string(),
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error, Box::from("Invalid floor"));
}

#[tokio::test]
async fn test_get_calls_filters() {
    let state = test_state(false, "00:00", "23:59").await;

    // First call sees rest, the rest see busy.
    for (current, external) in [("G", true), ("1", false), ("2", true)] {
        log_elevator_call(
            State(state.clone()),
            Ok(Json(call_request(current, "3", external))),
        )
        .await
        .unwrap();
    }

    let Json(at_rest) = get_calls(
        State(state.clone()),
        Ok(Query(ListCallsQuery {
            at_rest_only: Some(true),
            is_external_call: None,
        })),
    )
    .await
    .unwrap();
    assert_eq!(at_rest.len(), 1);
    assert_eq!(at_rest[0].current_floor, "G");

    let Json(internal) = get_calls(
        State(state.clone()),
        Ok(Query(ListCallsQuery {
            at_rest_only: None,
            is_external_call: Some(false),
        })),
    )
    .await
    .unwrap();
    assert_eq!(internal.len(), 1);
    assert_eq!(internal[0].current_floor, "1");

    let Json(both) = get_calls(
        State(state.clone()),
        Ok(Query(ListCallsQuery {
            at_rest_only: Some(true),
            is_external_call: Some(false),
        })),
    )
    .await
    .unwrap();
    assert!(both.is_empty());
}

/// The full scenario from the service description: seed at G, call G->3,
/// move rejected while busy, rest at G, then move to 3.
#[tokio::test]
async fn test_full_call_rest_move_scenario() {
    let state = test_state(false, "06:00", "22:00").await;
    crate::seeds::seed_initial_state(&state.db, &state.building)
        .await
        .unwrap();

    let (status, _) =
        log_elevator_call(State(state.clone()), Ok(Json(call_request("G", "3", true))))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let calls = list_all(&state).await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].elevator_at_rest);

    let err = move_elevator(
        State(state.clone()),
        Ok(Json(MoveRequest {
            destination_floor: "3".to_string(),
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error, Box::from("Elevator is busy"));

    set_elevator_at_rest(
        State(state.clone()),
        Ok(Json(AtRestRequest {
            current_floor: "G".to_string(),
        })),
    )
    .await
    .unwrap();

    let (status, _) = move_elevator(
        State(state.clone()),
        Ok(Json(MoveRequest {
            destination_floor: "3".to_string(),
        })),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let latest = StateRepository::new(&state.db)
        .latest()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.current_floor, "3");
    assert!(latest.is_at_rest);
}
