use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_bootstrap::{add_touch_trigger, drop_touch_trigger};
use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000004_create_catalog::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Carts::Table)
                    .if_not_exists()
                    .col(pk_uuid(Carts::Id))
                    .col(uuid(Carts::UserId))
                    .col(uuid(Carts::ProductId))
                    .col(integer(Carts::Quantity).check(Expr::col(Carts::Quantity).gt(0)))
                    .col(
                        timestamp_with_time_zone(Carts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Carts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_carts_user_id")
                            .from(Carts::Table, Carts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_carts_product_id")
                            .from(Carts::Table, Carts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Add-to-cart upserts on this pair
        manager
            .create_index(
                Index::create()
                    .name("uq_carts_user_product")
                    .table(Carts::Table)
                    .col(Carts::UserId)
                    .col(Carts::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        add_touch_trigger(manager, "carts").await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_touch_trigger(manager, "carts").await?;

        manager
            .drop_table(Table::drop().table(Carts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Carts {
    Table,
    Id,
    UserId,
    ProductId,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
