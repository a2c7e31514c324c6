use chrono::Utc;
use entity::sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use entity::{access_token, category, food, user};
use rust_decimal::Decimal;
use sea_orm_migration::prelude::*;
use uuid::Uuid;

/// Bearer tokens for the seeded demo accounts. Handy for exercising the
/// API from curl; rotate them before exposing an instance anywhere real.
const DEMO_CUSTOMER_TOKEN: &str = "4f9c3d11-7aa8-4f0e-9b3a-6f0d2f8a1c55";
const DEMO_ADMIN_TOKEN: &str = "b2d86a0e-91c4-4c7a-8f3e-2a5b9d4e7f10";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let now = Utc::now();

        let customer = user::ActiveModel {
            email: Set("demo@feastly.dev".to_owned()),
            first_name: Set("Demo".to_owned()),
            last_name: Set("Customer".to_owned()),
            phone_number: Set("+880 1700-000000".to_owned()),
            address: Set("12 Green Road, Dhaka".to_owned()),
            is_staff: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let admin = user::ActiveModel {
            email: Set("admin@feastly.dev".to_owned()),
            first_name: Set("Demo".to_owned()),
            last_name: Set("Admin".to_owned()),
            phone_number: Set("+880 1800-000000".to_owned()),
            address: Set("1 Staff Lane, Dhaka".to_owned()),
            is_staff: Set(true),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (owner, token) in [
            (&customer, DEMO_CUSTOMER_TOKEN),
            (&admin, DEMO_ADMIN_TOKEN),
        ] {
            access_token::ActiveModel {
                user_id: Set(owner.id),
                token: Set(token.parse::<Uuid>().map_err(|e| {
                    DbErr::Migration(format!("invalid demo token {token}: {e}"))
                })?),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        let mains = category::ActiveModel {
            name: Set("Mains".to_owned()),
            description: Set(Some("Rice, curry and grills".to_owned())),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let drinks = category::ActiveModel {
            name: Set("Drinks".to_owned()),
            description: Set(Some("Hot and cold beverages".to_owned())),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let menu: [(&str, &str, &str, i32, i32, bool, i32); 5] = [
            ("Chicken Biryani", "Aromatic rice with spiced chicken", "220.00", mains.id, 40, true, 10),
            ("Beef Tehari", "Yellow rice cooked with tender beef", "180.00", mains.id, 25, false, 0),
            ("Grilled Chicken", "Half chicken, charcoal grilled", "260.00", mains.id, 15, false, 0),
            ("Mango Lassi", "Yogurt drink with ripe mango", "90.00", drinks.id, 60, true, 5),
            ("Masala Tea", "Black tea brewed with spices", "40.00", drinks.id, 100, false, 0),
        ];

        for (name, description, price, category_id, stock, is_special, discount) in menu {
            food::ActiveModel {
                name: Set(name.to_owned()),
                description: Set(description.to_owned()),
                price: Set(price.parse::<Decimal>().map_err(|e| {
                    DbErr::Migration(format!("invalid seed price {price}: {e}"))
                })?),
                stock: Set(stock),
                category_id: Set(category_id),
                is_special: Set(is_special),
                discount_percent: Set(discount),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        println!("Seeded demo users; customer token {DEMO_CUSTOMER_TOKEN}, admin token {DEMO_ADMIN_TOKEN}");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Users cascade to tokens, carts and orders; categories cascade to foods.
        user::Entity::delete_many()
            .filter(user::Column::Email.is_in(["demo@feastly.dev", "admin@feastly.dev"]))
            .exec(db)
            .await?;
        category::Entity::delete_many()
            .filter(category::Column::Name.is_in(["Mains", "Drinks"]))
            .exec(db)
            .await?;

        Ok(())
    }
}
