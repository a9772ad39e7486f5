//! Migration to create time_off table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeOff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeOff::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeOff::UserId).string_len(36).not_null())
                    .col(ColumnDef::new(TimeOff::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(TimeOff::StartDate).date().not_null())
                    .col(ColumnDef::new(TimeOff::EndDate).date().not_null())
                    .col(ColumnDef::new(TimeOff::Description).text().null())
                    .col(
                        ColumnDef::new(TimeOff::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(TimeOff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeOff::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_off_user")
                            .from(TimeOff::Table, TimeOff::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_off_user_created")
                    .table(TimeOff::Table)
                    .col(TimeOff::UserId)
                    .col(TimeOff::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeOff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TimeOff {
    Table,
    Id,
    UserId,
    Kind,
    StartDate,
    EndDate,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
