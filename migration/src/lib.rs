pub use sea_orm_migration::prelude::*;

mod m20250112_000001_create_user_table;
mod m20250112_000002_create_access_token_table;
mod m20250112_000003_create_category_table;
mod m20250112_000004_create_food_table;
mod m20250112_000005_create_cart_table;
mod m20250112_000006_create_cart_item_table;
mod m20250112_000007_create_order_table;
mod m20250112_000008_create_order_item_table;
mod m20250112_000009_create_payment_session_table;
mod m20250112_000010_create_review_table;
mod m20250113_000001_seed_demo_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250112_000001_create_user_table::Migration),
            Box::new(m20250112_000002_create_access_token_table::Migration),
            Box::new(m20250112_000003_create_category_table::Migration),
            Box::new(m20250112_000004_create_food_table::Migration),
            Box::new(m20250112_000005_create_cart_table::Migration),
            Box::new(m20250112_000006_create_cart_item_table::Migration),
            Box::new(m20250112_000007_create_order_table::Migration),
            Box::new(m20250112_000008_create_order_item_table::Migration),
            Box::new(m20250112_000009_create_payment_session_table::Migration),
            Box::new(m20250112_000010_create_review_table::Migration),
            Box::new(m20250113_000001_seed_demo_data::Migration),
        ]
    }
}
