use sea_orm_migration::{prelude::*, schema::*};

use super::m20250112_000003_create_category_table::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Foods::Table)
                    .col(pk_auto(Foods::Id))
                    .col(string(Foods::Name))
                    .col(text(Foods::Description))
                    .col(decimal_len(Foods::Price, 10, 2))
                    .col(integer(Foods::Stock))
                    .col(integer(Foods::CategoryId))
                    .col(boolean(Foods::IsSpecial))
                    .col(integer(Foods::DiscountPercent))
                    .col(timestamp_with_time_zone(Foods::CreatedAt))
                    .col(timestamp_with_time_zone(Foods::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-foods-category_id")
                            .from(Foods::Table, Foods::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Foods::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Foods {
    Table,
    Id,
    Name,
    Description,
    Price,
    Stock,
    CategoryId,
    IsSpecial,
    DiscountPercent,
    CreatedAt,
    UpdatedAt,
}
