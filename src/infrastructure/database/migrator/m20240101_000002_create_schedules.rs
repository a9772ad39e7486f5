//! Migration to create schedules table
//!
//! `user_id` is unique so default-schedule creation can be an
//! insert-or-ignore instead of a read-then-write.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(Schedules::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Schedules::Id)
                    .string_len(36)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Schedules::UserId).string_len(36).not_null());

        for column in Schedules::DAY_COLUMNS {
            table.col(
                ColumnDef::new(column)
                    .string_len(5)
                    .not_null()
                    .default(if column.is_start() { "09:00" } else { "17:30" }),
            );
        }

        table
            .col(
                ColumnDef::new(Schedules::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Schedules::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_schedules_user")
                    .from(Schedules::Table, Schedules::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );

        manager.create_table(table.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_user_id")
                    .table(Schedules::Table)
                    .col(Schedules::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum Schedules {
    Table,
    Id,
    UserId,
    MondayStart,
    MondayEnd,
    TuesdayStart,
    TuesdayEnd,
    WednesdayStart,
    WednesdayEnd,
    ThursdayStart,
    ThursdayEnd,
    FridayStart,
    FridayEnd,
    SaturdayStart,
    SaturdayEnd,
    SundayStart,
    SundayEnd,
    CreatedAt,
    UpdatedAt,
}

impl Schedules {
    const DAY_COLUMNS: [Schedules; 14] = [
        Schedules::MondayStart,
        Schedules::MondayEnd,
        Schedules::TuesdayStart,
        Schedules::TuesdayEnd,
        Schedules::WednesdayStart,
        Schedules::WednesdayEnd,
        Schedules::ThursdayStart,
        Schedules::ThursdayEnd,
        Schedules::FridayStart,
        Schedules::FridayEnd,
        Schedules::SaturdayStart,
        Schedules::SaturdayEnd,
        Schedules::SundayStart,
        Schedules::SundayEnd,
    ];

    fn is_start(&self) -> bool {
        matches!(
            self,
            Schedules::MondayStart
                | Schedules::TuesdayStart
                | Schedules::WednesdayStart
                | Schedules::ThursdayStart
                | Schedules::FridayStart
                | Schedules::SaturdayStart
                | Schedules::SundayStart
        )
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
