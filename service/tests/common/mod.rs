#![allow(dead_code)]

use chrono::Utc;
use entity::{category, food, user};
use feastly_service::sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Schema, Set,
};
use rust_decimal::Decimal;

/// Fresh in-memory sqlite database with the full schema. The pool holds a
/// single connection, so every test sees one coherent database.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    for stmt in [
        schema.create_table_from_entity(entity::user::Entity),
        schema.create_table_from_entity(entity::access_token::Entity),
        schema.create_table_from_entity(entity::category::Entity),
        schema.create_table_from_entity(entity::food::Entity),
        schema.create_table_from_entity(entity::cart::Entity),
        schema.create_table_from_entity(entity::cart_item::Entity),
        schema.create_table_from_entity(entity::order::Entity),
        schema.create_table_from_entity(entity::order_item::Entity),
        schema.create_table_from_entity(entity::payment_session::Entity),
        schema.create_table_from_entity(entity::review::Entity),
    ] {
        db.execute(backend.build(&stmt)).await.unwrap();
    }

    db
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, is_staff: bool) -> user::Model {
    user::ActiveModel {
        email: Set(email.to_owned()),
        first_name: Set("Test".to_owned()),
        last_name: Set("User".to_owned()),
        phone_number: Set("+880 1700-000000".to_owned()),
        address: Set("12 Green Road, Dhaka".to_owned()),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_category(db: &DatabaseConnection, name: &str) -> category::Model {
    category::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_food(
    db: &DatabaseConnection,
    category_id: i32,
    name: &str,
    price: &str,
) -> food::Model {
    let now = Utc::now();
    food::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(format!("{name} for tests")),
        price: Set(price.parse::<Decimal>().unwrap()),
        stock: Set(50),
        category_id: Set(category_id),
        is_special: Set(false),
        discount_percent: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
