use sea_orm_migration::{prelude::*, schema::*};

use super::m20250112_000001_create_user_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessTokens::Table)
                    .col(pk_auto(AccessTokens::Id))
                    .col(integer(AccessTokens::UserId))
                    .col(uuid_uniq(AccessTokens::Token))
                    .col(timestamp_with_time_zone(AccessTokens::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-access_tokens-user_id")
                            .from(AccessTokens::Table, AccessTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccessTokens {
    Table,
    Id,
    UserId,
    Token,
    CreatedAt,
}
