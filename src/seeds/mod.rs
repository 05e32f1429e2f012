//! Database seeding functionality
//!
//! Seeds the initial elevator resting state from the building configuration.
//! The seed is idempotent: it only runs when the state log is empty.

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::BuildingConfig;
use crate::repositories::StateRepository;

/// Inserts the initial resting state at the configured default floor if no
/// state has been recorded yet.
pub async fn seed_initial_state(
    db: &DatabaseConnection,
    building: &BuildingConfig,
) -> Result<()> {
    let repo = StateRepository::new(db);

    if repo.count().await.context("counting elevator states")? > 0 {
        tracing::debug!("elevator state already seeded, skipping");
        return Ok(());
    }

    let floor = building.default_resting_floor();
    repo.record(floor, true)
        .await
        .context("inserting initial elevator state")?;

    tracing::info!(floor, "seeded initial elevator state at rest");
    Ok(())
}
