use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_bootstrap::{add_touch_trigger, drop_touch_trigger};
use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One active refresh token per user; login and refresh upsert on user_id.
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(uuid(AuthTokens::UserId).unique_key())
                    .col(string(AuthTokens::RefreshToken))
                    .col(timestamp_with_time_zone(AuthTokens::ExpiredAt))
                    .col(
                        timestamp_with_time_zone(AuthTokens::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(AuthTokens::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_tokens_user_id")
                            .from(AuthTokens::Table, AuthTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        add_touch_trigger(manager, "auth_tokens").await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_touch_trigger(manager, "auth_tokens").await?;

        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    UserId,
    RefreshToken,
    ExpiredAt,
    CreatedAt,
    UpdatedAt,
}
