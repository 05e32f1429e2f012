//! Test utilities for database and server setup.
//!
//! Provides an in-memory SQLite database with migrations applied and a fully
//! wired application state for integration tests.

use std::sync::Arc;

use anyhow::Result;
use elevator_backend::config::{AppConfig, BuildingConfig};
use elevator_backend::server::AppState;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Sets up an in-memory SQLite database with all migrations applied.
///
/// The pool is capped at one connection: every pooled `sqlite::memory:`
/// connection would otherwise open its own empty database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// The four-floor building used throughout the tests.
pub fn test_building() -> BuildingConfig {
    BuildingConfig::new(
        vec!["G".into(), "1".into(), "2".into(), "3".into()],
        "06:00",
        "22:00",
        "G".into(),
    )
    .expect("test building config is valid")
}

/// Builds an application state over a fresh in-memory database.
///
/// Operational-hours enforcement is disabled so tests are independent of the
/// wall clock; the dedicated hours tests construct their own state.
#[allow(dead_code)]
pub async fn setup_test_state() -> Result<AppState> {
    let db = setup_test_db().await?;
    Ok(AppState {
        config: Arc::new(AppConfig {
            enforce_operational_hours: false,
            ..Default::default()
        }),
        building: Arc::new(test_building()),
        db,
    })
}
