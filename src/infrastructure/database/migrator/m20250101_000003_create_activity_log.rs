//! Migration to create activity_log table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLog::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLog::UserId).string_len(64).not_null())
                    .col(ColumnDef::new(ActivityLog::Action).string_len(32).not_null())
                    .col(ColumnDef::new(ActivityLog::Details).text().null())
                    .col(ColumnDef::new(ActivityLog::Metadata).text().null())
                    .col(
                        ColumnDef::new(ActivityLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_log_user")
                            .from(ActivityLog::Table, ActivityLog::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_log_user_created")
                    .table(ActivityLog::Table)
                    .col(ActivityLog::UserId)
                    .col(ActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActivityLog {
    Table,
    Id,
    UserId,
    Action,
    Details,
    Metadata,
    CreatedAt,
}
