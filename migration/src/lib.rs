//! Database migrations for the elevator backend.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_01_10_000001_create_elevator_states;
mod m2026_01_10_000002_create_elevator_calls;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_01_10_000001_create_elevator_states::Migration),
            Box::new(m2026_01_10_000002_create_elevator_calls::Migration),
        ]
    }
}
