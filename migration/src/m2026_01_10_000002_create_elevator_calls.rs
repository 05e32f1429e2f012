//! Migration to create the elevator_calls table.
//!
//! Calls are immutable once written; the elevator_at_rest column snapshots
//! the resting status that held immediately before the call was logged.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ElevatorCalls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ElevatorCalls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ElevatorCalls::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ElevatorCalls::CurrentFloor)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElevatorCalls::DestinationFloor)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElevatorCalls::IsExternalCall)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElevatorCalls::ElevatorAtRest)
                            .boolean()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the chronological listing in GET /get_calls
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE INDEX IF NOT EXISTS idx_elevator_calls_timestamp ON elevator_calls (timestamp)"
                    .to_string(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ElevatorCalls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ElevatorCalls {
    Table,
    Id,
    Timestamp,
    CurrentFloor,
    DestinationFloor,
    IsExternalCall,
    ElevatorAtRest,
}
