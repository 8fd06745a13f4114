use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_bootstrap::{add_touch_trigger, drop_touch_trigger};
use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_uuid(Addresses::Id))
                    .col(uuid(Addresses::UserId))
                    .col(string(Addresses::AddressLine))
                    .col(string(Addresses::City))
                    .col(string(Addresses::State))
                    .col(string(Addresses::PostalCode))
                    .col(string(Addresses::Phone))
                    .col(boolean(Addresses::IsDefault).default(false))
                    .col(
                        timestamp_with_time_zone(Addresses::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Addresses::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user_id")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_user_id")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await?;

        add_touch_trigger(manager, "addresses").await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_touch_trigger(manager, "addresses").await?;

        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    AddressLine,
    City,
    State,
    PostalCode,
    Phone,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}
