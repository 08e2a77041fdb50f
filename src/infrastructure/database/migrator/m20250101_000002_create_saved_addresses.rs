//! Migration to create saved_addresses table

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
                    .table(SavedAddresses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedAddresses::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedAddresses::UserId).string_len(64).not_null())
                    .col(ColumnDef::new(SavedAddresses::Label).string_len(255).null())
                    .col(ColumnDef::new(SavedAddresses::Street).string().not_null())
                    .col(ColumnDef::new(SavedAddresses::City).string().not_null())
                    .col(ColumnDef::new(SavedAddresses::State).string().null())
                    .col(ColumnDef::new(SavedAddresses::PostalCode).string_len(32).not_null())
                    .col(ColumnDef::new(SavedAddresses::Country).string().not_null())
                    .col(ColumnDef::new(SavedAddresses::CountryCode).string_len(8).null())
                    .col(ColumnDef::new(SavedAddresses::FormattedAddress).text().not_null())
                    .col(ColumnDef::new(SavedAddresses::Latitude).string_len(32).null())
                    .col(ColumnDef::new(SavedAddresses::Longitude).string_len(32).null())
                    .col(ColumnDef::new(SavedAddresses::PlaceId).string().null())
                    .col(
                        ColumnDef::new(SavedAddresses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SavedAddresses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_addresses_user")
                            .from(SavedAddresses::Table, SavedAddresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_addresses_user_created")
                    .table(SavedAddresses::Table)
                    .col(SavedAddresses::UserId)
                    .col(SavedAddresses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedAddresses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SavedAddresses {
    Table,
    Id,
    UserId,
    Label,
    Street,
    City,
    State,
    PostalCode,
    Country,
    CountryCode,
    FormattedAddress,
    Latitude,
    Longitude,
    PlaceId,
    CreatedAt,
    UpdatedAt,
}
