use sea_orm_migration::{prelude::*, schema::*};

use super::m20250112_000004_create_food_table::Foods;
use super::m20250112_000005_create_cart_table::Carts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .col(pk_auto(CartItems::Id))
                    .col(uuid(CartItems::CartId))
                    .col(integer(CartItems::FoodId))
                    .col(integer(CartItems::Quantity))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cart_items-cart_id")
                            .from(CartItems::Table, CartItems::CartId)
                            .to(Carts::Table, Carts::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cart_items-food_id")
                            .from(CartItems::Table, CartItems::FoodId)
                            .to(Foods::Table, Foods::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One line per food in a cart; adding the same food again bumps
        // the quantity instead.
        manager
            .create_index(
                Index::create()
                    .name("idx-cart_items-cart_id-food_id")
                    .table(CartItems::Table)
                    .col(CartItems::CartId)
                    .col(CartItems::FoodId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CartItems {
    Table,
    Id,
    CartId,
    FoodId,
    Quantity,
}
