use sea_orm_migration::{prelude::*, schema::*};

use super::m20250112_000001_create_user_table::Users;
use super::m20250112_000004_create_food_table::Foods;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .col(pk_auto(Reviews::Id))
                    .col(integer(Reviews::FoodId))
                    .col(integer(Reviews::UserId))
                    .col(integer(Reviews::Ratings))
                    .col(text(Reviews::Comment))
                    .col(timestamp_with_time_zone(Reviews::CreatedAt))
                    .col(timestamp_with_time_zone(Reviews::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-food_id")
                            .from(Reviews::Table, Reviews::FoodId)
                            .to(Foods::Table, Foods::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user may review a given food once.
        manager
            .create_index(
                Index::create()
                    .name("idx-reviews-food_id-user_id")
                    .table(Reviews::Table)
                    .col(Reviews::FoodId)
                    .col(Reviews::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reviews {
    Table,
    Id,
    FoodId,
    UserId,
    Ratings,
    Comment,
    CreatedAt,
    UpdatedAt,
}
