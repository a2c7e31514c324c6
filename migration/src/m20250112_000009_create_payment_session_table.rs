use sea_orm_migration::{prelude::*, schema::*};

use super::m20250112_000007_create_order_table::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentSessions::Table)
                    .col(pk_auto(PaymentSessions::Id))
                    .col(integer_uniq(PaymentSessions::OrderId))
                    .col(string_uniq(PaymentSessions::TranId))
                    .col(decimal_len(PaymentSessions::Amount, 10, 2))
                    .col(string(PaymentSessions::Currency))
                    .col(timestamp_with_time_zone(PaymentSessions::CreatedAt))
                    .col(timestamp_with_time_zone(PaymentSessions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payment_sessions-order_id")
                            .from(PaymentSessions::Table, PaymentSessions::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentSessions {
    Table,
    Id,
    OrderId,
    TranId,
    Amount,
    Currency,
    CreatedAt,
    UpdatedAt,
}
