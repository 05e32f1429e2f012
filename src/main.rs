//! # Elevator Backend Main Entry Point
//!
//! Bootstraps the service: configuration, logging, database pool, schema
//! migration, initial state seeding, then the HTTP server.

use elevator_backend::{
    config::{BuildingConfig, ConfigLoader},
    db::init_pool,
    init_subscriber,
    seeds::seed_initial_state,
    server::run_server,
};
use migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::new().load()?;
    init_subscriber(&config);

    // Building config errors are fatal here and never reach the HTTP surface.
    let building = BuildingConfig::load(&config.building_config_path)?;
    tracing::info!(
        floors = ?building.floors(),
        default_resting_floor = building.default_resting_floor(),
        "loaded building configuration"
    );

    let db = init_pool(&config).await?;
    migration::Migrator::up(&db, None).await?;
    seed_initial_state(&db, &building).await?;

    run_server(config, building, db).await
}
