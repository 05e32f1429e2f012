//! Migration to create the elevator_states table.
//!
//! The table is an append-only log of state transitions; the row with the
//! highest id is the elevator's current state.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ElevatorStates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ElevatorStates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ElevatorStates::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ElevatorStates::CurrentFloor)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElevatorStates::IsAtRest)
                            .boolean()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ElevatorStates::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ElevatorStates {
    Table,
    Id,
    Timestamp,
    CurrentFloor,
    IsAtRest,
}
